use super::binary::one;
use crate::{
    op::{Op, OpCache},
    Tensor,
};
use emgrad_core::{array::Array, error::Result};

struct Sum {
    dim: usize,
    keep_dim: bool,
    cache: OpCache<Vec<usize>>,
}

impl Op for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.shape().to_vec());
        input.sum(self.dim, self.keep_dim)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input_shape = self.cache.take()?;
        let grad = if self.keep_dim {
            grad_out.broadcast_to(&input_shape)?
        } else {
            let mut kept = input_shape.clone();
            kept[self.dim] = 1;
            grad_out.reshape(&kept)?.broadcast_to(&input_shape)?
        };
        Ok(vec![Some(grad)])
    }
}

struct SumAll {
    cache: OpCache<Vec<usize>>,
}

impl Op for SumAll {
    fn name(&self) -> &'static str {
        "sum_all"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.shape().to_vec());
        input.sum_all()
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input_shape = self.cache.take()?;
        Ok(vec![Some(grad_out.broadcast_to(&input_shape)?)])
    }
}

impl Tensor {
    pub fn sum(&self, dim: usize, keep_dim: bool) -> Result<Tensor> {
        super::apply_op(
            Box::new(Sum {
                dim,
                keep_dim,
                cache: OpCache::new("sum"),
            }),
            &[self],
        )
    }

    /// Rank-0 total over every element.
    pub fn sum_all(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(SumAll {
                cache: OpCache::new("sum_all"),
            }),
            &[self],
        )
    }

    pub fn mean_all(&self) -> Result<Tensor> {
        let count = self.size().max(1);
        self.sum_all()?.mul_scalar(1.0 / count as f64)
    }

    pub fn mean(&self, dim: usize, keep_dim: bool) -> Result<Tensor> {
        let count = self.dim_size(dim).unwrap_or(1).max(1);
        self.sum(dim, keep_dim)?.mul_scalar(1.0 / count as f64)
    }
}
