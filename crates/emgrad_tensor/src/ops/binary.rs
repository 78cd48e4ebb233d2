use crate::{
    op::{Op, OpCache},
    Tensor,
};
use emgrad_core::{
    array::Array,
    error::{Error, Result},
    scalar::Scalar,
};

fn two<'a>(inputs: &[&'a Array], op: &str) -> Result<(&'a Array, &'a Array)> {
    match inputs {
        [lhs, rhs] => Ok((lhs, rhs)),
        _ => Err(Error::Internal {
            message: format!("op '{}' expects 2 inputs, got {}", op, inputs.len()),
        }),
    }
}

pub(super) fn one<'a>(inputs: &[&'a Array], op: &str) -> Result<&'a Array> {
    match inputs {
        [input] => Ok(input),
        _ => Err(Error::Internal {
            message: format!("op '{}' expects 1 input, got {}", op, inputs.len()),
        }),
    }
}

struct Add {
    cache: OpCache<(Vec<usize>, Vec<usize>)>,
}

impl Op for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = two(inputs, self.name())?;
        self.cache.save((lhs.shape().to_vec(), rhs.shape().to_vec()));
        lhs.add(rhs)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs_shape, rhs_shape) = self.cache.take()?;
        Ok(vec![
            Some(grad_out.sum_to_shape(&lhs_shape)?),
            Some(grad_out.sum_to_shape(&rhs_shape)?),
        ])
    }
}

struct Sub {
    cache: OpCache<(Vec<usize>, Vec<usize>)>,
}

impl Op for Sub {
    fn name(&self) -> &'static str {
        "sub"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = two(inputs, self.name())?;
        self.cache.save((lhs.shape().to_vec(), rhs.shape().to_vec()));
        lhs.sub(rhs)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs_shape, rhs_shape) = self.cache.take()?;
        Ok(vec![
            Some(grad_out.sum_to_shape(&lhs_shape)?),
            Some(grad_out.neg()?.sum_to_shape(&rhs_shape)?),
        ])
    }
}

struct Mul {
    cache: OpCache<(Array, Array)>,
}

impl Op for Mul {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = two(inputs, self.name())?;
        self.cache.save((lhs.clone(), rhs.clone()));
        lhs.mul(rhs)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs, rhs) = self.cache.take()?;
        Ok(vec![
            Some(grad_out.mul(&rhs)?.sum_to_shape(lhs.shape())?),
            Some(grad_out.mul(&lhs)?.sum_to_shape(rhs.shape())?),
        ])
    }
}

struct Div {
    cache: OpCache<(Array, Array)>,
}

impl Op for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = two(inputs, self.name())?;
        self.cache.save((lhs.clone(), rhs.clone()));
        lhs.div(rhs)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs, rhs) = self.cache.take()?;
        let grad_lhs = grad_out.div(&rhs)?.sum_to_shape(lhs.shape())?;
        let grad_rhs = grad_out
            .mul(&lhs)?
            .div(&rhs.mul(&rhs)?)?
            .neg()?
            .sum_to_shape(rhs.shape())?;
        Ok(vec![Some(grad_lhs), Some(grad_rhs)])
    }
}

struct Pow {
    cache: OpCache<(Array, Array, Array)>,
}

impl Op for Pow {
    fn name(&self) -> &'static str {
        "pow"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let (lhs, rhs) = two(inputs, self.name())?;
        let out = lhs.pow(rhs)?;
        self.cache.save((lhs.clone(), rhs.clone(), out.clone()));
        Ok(out)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let (lhs, rhs, out) = self.cache.take()?;
        // d/da a^b = b * a^(b-1), d/db a^b = a^b * ln(a)
        let grad_lhs = grad_out
            .mul(&rhs)?
            .mul(&lhs.pow(&rhs.add_scalar(-1.0)?)?)?
            .sum_to_shape(lhs.shape())?;
        let grad_rhs = grad_out
            .mul(&out)?
            .mul(&lhs.ln()?)?
            .sum_to_shape(rhs.shape())?;
        Ok(vec![Some(grad_lhs), Some(grad_rhs)])
    }
}

struct AddScalar {
    scalar: Scalar,
    cache: OpCache<()>,
}

impl Op for AddScalar {
    fn name(&self) -> &'static str {
        "add_scalar"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(());
        input.add_scalar(self.scalar)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        self.cache.take()?;
        Ok(vec![Some(grad_out.clone())])
    }
}

struct MulScalar {
    scalar: Scalar,
    cache: OpCache<()>,
}

impl Op for MulScalar {
    fn name(&self) -> &'static str {
        "mul_scalar"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(());
        input.mul_scalar(self.scalar)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        self.cache.take()?;
        Ok(vec![Some(grad_out.mul_scalar(self.scalar)?)])
    }
}

struct PowScalar {
    exponent: Scalar,
    cache: OpCache<Array>,
}

impl Op for PowScalar {
    fn name(&self) -> &'static str {
        "pow_scalar"
    }

    fn forward(&mut self, inputs: &[&Array]) -> Result<Array> {
        let input = one(inputs, self.name())?;
        self.cache.save(input.clone());
        input.pow_scalar(self.exponent)
    }

    fn backward(&mut self, grad_out: &Array) -> Result<Vec<Option<Array>>> {
        let input = self.cache.take()?;
        let n = self.exponent.as_f64();
        let grad = grad_out
            .mul(&input.pow_scalar(n - 1.0)?)?
            .mul_scalar(n)?;
        Ok(vec![Some(grad)])
    }
}

impl Tensor {
    pub fn add(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(Add {
                cache: OpCache::new("add"),
            }),
            &[self, rhs],
        )
    }

    pub fn sub(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(Sub {
                cache: OpCache::new("sub"),
            }),
            &[self, rhs],
        )
    }

    pub fn mul(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(Mul {
                cache: OpCache::new("mul"),
            }),
            &[self, rhs],
        )
    }

    pub fn div(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(Div {
                cache: OpCache::new("div"),
            }),
            &[self, rhs],
        )
    }

    pub fn pow(&self, rhs: &Tensor) -> Result<Tensor> {
        super::apply_op(
            Box::new(Pow {
                cache: OpCache::new("pow"),
            }),
            &[self, rhs],
        )
    }

    pub fn add_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        super::apply_op(
            Box::new(AddScalar {
                scalar: scalar.into(),
                cache: OpCache::new("add_scalar"),
            }),
            &[self],
        )
    }

    pub fn mul_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        super::apply_op(
            Box::new(MulScalar {
                scalar: scalar.into(),
                cache: OpCache::new("mul_scalar"),
            }),
            &[self],
        )
    }

    pub fn pow_scalar(&self, exponent: impl Into<Scalar>) -> Result<Tensor> {
        super::apply_op(
            Box::new(PowScalar {
                exponent: exponent.into(),
                cache: OpCache::new("pow_scalar"),
            }),
            &[self],
        )
    }

    pub fn sub_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        self.add_scalar(-scalar.into().as_f64())
    }

    pub fn div_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        self.mul_scalar(1.0 / scalar.into().as_f64())
    }
}
