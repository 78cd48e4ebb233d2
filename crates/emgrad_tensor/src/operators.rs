use crate::Tensor;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident) => {
        impl $trait<&Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, rhs: &Tensor) -> Self::Output {
                Tensor::$method(self, rhs).unwrap()
            }
        }

        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, rhs: Tensor) -> Self::Output {
                Tensor::$method(self, &rhs).unwrap()
            }
        }

        impl $trait<&Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, rhs: &Tensor) -> Self::Output {
                Tensor::$method(&self, rhs).unwrap()
            }
        }

        impl $trait<Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, rhs: Tensor) -> Self::Output {
                Tensor::$method(&self, &rhs).unwrap()
            }
        }
    };
}

impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);
impl_binary_operator!(Mul, mul);
impl_binary_operator!(Div, div);

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(self).unwrap()
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(&self).unwrap()
    }
}
