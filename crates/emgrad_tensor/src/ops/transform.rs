use super::binary::one;
use crate::{
    op::{Op, OpCache},
    Tensor,
};
use emgrad_core::{array::Array, error::Result};

struct Reshape {
    shape: Vec<usize>,
    cache: OpCache<Vec<usize>>,
}

impl Op for Reshape {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.shape().to_vec());
        input.reshape(&self.shape)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input_shape = self.cache.take()?;
        Ok(vec![Some(grad_out.reshape(&input_shape)?)])
    }
}

struct Transpose {
    cache: OpCache<()>,
}

impl Op for Transpose {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(());
        input.transpose()
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        self.cache.take()?;
        Ok(vec![Some(grad_out.transpose()?)])
    }
}

struct BroadcastTo {
    shape: Vec<usize>,
    cache: OpCache<Vec<usize>>,
}

impl Op for BroadcastTo {
    fn name(&self) -> &'static str {
        "broadcast_to"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.shape().to_vec());
        input.broadcast_to(&self.shape)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input_shape = self.cache.take()?;
        Ok(vec![Some(grad_out.sum_to_shape(&input_shape)?)])
    }
}

impl Tensor {
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor> {
        super::apply_op(
            Box::new(Reshape {
                shape: shape.to_vec(),
                cache: OpCache::new("reshape"),
            }),
            &[self],
        )
    }

    pub fn transpose(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Transpose {
                cache: OpCache::new("transpose"),
            }),
            &[self],
        )
    }

    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Tensor> {
        super::apply_op(
            Box::new(BroadcastTo {
                shape: shape.to_vec(),
                cache: OpCache::new("broadcast_to"),
            }),
            &[self],
        )
    }
}
