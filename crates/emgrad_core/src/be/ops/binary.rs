use super::check_cpu;
use crate::{
    array::{Array, ArrayStorage},
    error::{Error, Result},
    scalar::Scalar,
};

macro_rules! dispatch_binary {
    ($name:ident, [$($t:ident),* $(,)?]) => {
        pub fn $name(
            out: &mut Array,
            lhs: &Array,
            rhs: &Array,
            num_els: usize,
            num_dims: usize,
            metadata: Option<&[usize]>,
        ) -> Result<()> {
            check_cpu(out)?;
            let expected = out.dtype();
            paste::paste! {
                match (out.storage_mut(), lhs.storage(), rhs.storage()) {
                    $(
                        (ArrayStorage::[<$t:upper>](o), ArrayStorage::[<$t:upper>](l), ArrayStorage::[<$t:upper>](r)) => {
                            emgrad_cpu::ops::binary::[<$name _ $t>](num_els, num_dims, metadata, l, r, o);
                            Ok(())
                        }
                    )*
                    (_, l, _) => Err(Error::DTypeMismatch {
                        expected,
                        got: l.dtype(),
                    }),
                }
            }
        }
    };
}

macro_rules! dispatch_binary_float {
    ($name:ident, [$($t:ident),* $(,)?]) => {
        pub fn $name(
            out: &mut Array,
            lhs: &Array,
            rhs: &Array,
            num_els: usize,
            num_dims: usize,
            metadata: Option<&[usize]>,
        ) -> Result<()> {
            check_cpu(out)?;
            paste::paste! {
                match (out.storage_mut(), lhs.storage(), rhs.storage()) {
                    $(
                        (ArrayStorage::[<$t:upper>](o), ArrayStorage::[<$t:upper>](l), ArrayStorage::[<$t:upper>](r)) => {
                            emgrad_cpu::ops::binary::[<$name _ $t>](num_els, num_dims, metadata, l, r, o);
                            Ok(())
                        }
                    )*
                    _ => Err(Error::UnsupportedDType),
                }
            }
        }
    };
}

macro_rules! dispatch_scalar {
    ($name:ident, [$($t:ident),* $(,)?]) => {
        pub fn $name(out: &mut Array, input: &Array, scalar: Scalar, num_els: usize) -> Result<()> {
            check_cpu(out)?;
            paste::paste! {
                match (out.storage_mut(), input.storage()) {
                    $(
                        (ArrayStorage::[<$t:upper>](o), ArrayStorage::[<$t:upper>](i)) => {
                            emgrad_cpu::ops::binary::[<$name _ $t>](num_els, scalar.[<as_ $t>](), i, o);
                            Ok(())
                        }
                    )*
                    _ => Err(Error::UnsupportedDType),
                }
            }
        }
    };
}

dispatch_binary!(add, [f16, f32, f64, i32, i64]);
dispatch_binary!(sub, [f16, f32, f64, i32, i64]);
dispatch_binary!(mul, [f16, f32, f64, i32, i64]);
dispatch_binary!(div, [f16, f32, f64, i32, i64]);
dispatch_binary_float!(pow, [f16, f32, f64]);

dispatch_scalar!(add_scalar, [f16, f32, f64, i32, i64]);
dispatch_scalar!(mul_scalar, [f16, f32, f64, i32, i64]);
dispatch_scalar!(pow_scalar, [f16, f32, f64]);
