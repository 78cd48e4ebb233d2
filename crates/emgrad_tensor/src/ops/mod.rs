mod binary;
mod matmul;
mod reduction;
mod transform;
mod unary;

use crate::{op::Op, Tensor, TensorNode};
use emgrad_core::{
    array::Array,
    error::{Error, Result},
};

/// Runs `op.forward` over the inputs and, when any input tracks gradients,
/// records the node. Inputs must share a device; forward runs with that
/// device installed as the ambient default.
pub(crate) fn apply_op(mut op: Box<dyn Op>, inputs: &[&Tensor]) -> Result<Tensor> {
    let device = inputs
        .first()
        .map(|t| t.device())
        .ok_or(Error::InvalidArgument("op applied to no inputs".to_string()))?;
    for tensor in &inputs[1..] {
        if tensor.device() != device {
            return Err(Error::DeviceMismatch {
                expected: device,
                got: tensor.device(),
            });
        }
    }

    let arrays: Vec<&Array> = inputs.iter().map(|t| t.array()).collect();
    let out = {
        let _guard = device.scoped();
        op.forward(&arrays)?
    };

    let mut result = Tensor::from_array(out);
    if inputs.iter().any(|t| t.requires_grad()) {
        result.metadata.requires_grad = true;
        result.set_node(TensorNode::new(
            op,
            inputs.iter().map(|&t| t.clone()).collect(),
        ));
    }
    Ok(result)
}
