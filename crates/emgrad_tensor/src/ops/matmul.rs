use crate::{
    op::{Op, OpCache},
    Tensor,
};
use emgrad_core::{
    array::Array,
    error::{Error, Result},
};

struct MatMul {
    cache: OpCache<(Array, Array)>,
}

impl Op for MatMul {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = match inputs {
            [lhs, rhs] => (*lhs, *rhs),
            _ => {
                return Err(Error::Internal {
                    message: format!("op 'matmul' expects 2 inputs, got {}", inputs.len()),
                })
            }
        };
        self.cache.save((lhs.clone(), rhs.clone()));
        lhs.matmul(rhs)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs, rhs) = self.cache.take()?;
        // dL/dA = dL/dC · Bᵗ, dL/dB = Aᵗ · dL/dC
        let grad_lhs = grad_out.matmul(&rhs.transpose()?)?;
        let grad_rhs = lhs.transpose()?.matmul(grad_out)?;
        Ok(vec![Some(grad_lhs), Some(grad_rhs)])
    }
}

impl Tensor {
    pub fn matmul(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(MatMul {
                cache: OpCache::new("matmul"),
            }),
            &[self, rhs],
        )
    }
}
