use super::check_cpu;
use crate::{
    array::{Array, ArrayStorage},
    error::{Error, Result},
};

macro_rules! dispatch_unary {
    ($name:ident, [$($t:ident),* $(,)?]) => {
        pub fn $name(out: &mut Array, input: &Array, num_els: usize) -> Result<()> {
            check_cpu(out)?;
            paste::paste! {
                match (out.storage_mut(), input.storage()) {
                    $(
                        (ArrayStorage::[<$t:upper>](o), ArrayStorage::[<$t:upper>](i)) => {
                            emgrad_cpu::ops::unary::[<$name _ $t>](num_els, i, o);
                            Ok(())
                        }
                    )*
                    _ => Err(Error::UnsupportedDType),
                }
            }
        }
    };
}

dispatch_unary!(neg, [f16, f32, f64, i32, i64]);
dispatch_unary!(abs, [f16, f32, f64, i32, i64]);
dispatch_unary!(sign, [f16, f32, f64, i32, i64]);
dispatch_unary!(exp, [f16, f32, f64]);
dispatch_unary!(ln, [f16, f32, f64]);
dispatch_unary!(sqrt, [f16, f32, f64]);
dispatch_unary!(tanh, [f16, f32, f64]);
