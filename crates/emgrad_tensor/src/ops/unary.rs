use super::binary::one;
use crate::{
    op::{Op, OpCache},
    Tensor,
};
use emgrad_core::{array::Array, error::Result};

struct Neg {
    cache: OpCache<()>,
}

impl Op for Neg {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(());
        input.neg()
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        self.cache.take()?;
        Ok(vec![Some(grad_out.neg()?)])
    }
}

struct Abs {
    cache: OpCache<Array>,
}

impl Op for Abs {
    fn name(&self) -> &'static str {
        "abs"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.clone());
        input.abs()
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input = self.cache.take()?;
        Ok(vec![Some(grad_out.mul(&input.sign()?)?)])
    }
}

struct Sign {
    cache: OpCache<()>,
}

impl Op for Sign {
    fn name(&self) -> &'static str {
        "sign"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(());
        input.sign()
    }

    // zero almost everywhere
    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        self.cache.take()?;
        Ok(vec![Some(Array::zeros_like(grad_out)?)])
    }
}

struct Exp {
    cache: OpCache<Array>,
}

impl Op for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        let out = input.exp()?;
        self.cache.save(out.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let out = self.cache.take()?;
        Ok(vec![Some(grad_out.mul(&out)?)])
    }
}

struct Ln {
    cache: OpCache<Array>,
}

impl Op for Ln {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.clone());
        input.ln()
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input = self.cache.take()?;
        Ok(vec![Some(grad_out.div(&input)?)])
    }
}

struct Sqrt {
    cache: OpCache<Array>,
}

impl Op for Sqrt {
    fn name(&self) -> &'static str {
        "sqrt"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        let out = input.sqrt()?;
        self.cache.save(out.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let out = self.cache.take()?;
        Ok(vec![Some(grad_out.div(&out.mul_scalar(2.0)?)?)])
    }
}

struct Tanh {
    cache: OpCache<Array>,
}

impl Op for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        let out = input.tanh()?;
        self.cache.save(out.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let out = self.cache.take()?;
        let one_minus_sq = out.mul(&out)?.neg()?.add_scalar(1.0)?;
        Ok(vec![Some(grad_out.mul(&one_minus_sq)?)])
    }
}

impl Tensor {
    pub fn neg(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Neg {
                cache: OpCache::new("neg"),
            }),
            &[self],
        )
    }

    pub fn abs(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Abs {
                cache: OpCache::new("abs"),
            }),
            &[self],
        )
    }

    pub fn sign(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Sign {
                cache: OpCache::new("sign"),
            }),
            &[self],
        )
    }

    pub fn exp(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Exp {
                cache: OpCache::new("exp"),
            }),
            &[self],
        )
    }

    pub fn ln(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Ln {
                cache: OpCache::new("ln"),
            }),
            &[self],
        )
    }

    pub fn sqrt(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Sqrt {
                cache: OpCache::new("sqrt"),
            }),
            &[self],
        )
    }

    pub fn tanh(&self) -> Result<Tensor> {
        super::apply_op(
            Box::new(Tanh {
                cache: OpCache::new("tanh"),
            }),
            &[self],
        )
    }
}
