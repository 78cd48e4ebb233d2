use crate::utils::{compute_factors, offset_for};
use half::f16;
use rayon::prelude::*;

/// Elementwise binary kernel over `num_els` output elements. `metadata` is
/// either `None` (both operands contiguous with the output's shape) or
/// `dims[num_dims] ++ lhs_strides[num_dims] ++ rhs_strides[num_dims]`, with
/// stride 0 on axes an operand was broadcast along.
macro_rules! binary_op {
    ($name:ident, [$($t:ident),* $(,)?], $op:expr) => {
        paste::paste! {
            $(
                pub fn [<$name _ $t>](
                    num_els: usize,
                    num_dims: usize,
                    metadata: Option<&[usize]>,
                    lhs: &[$t],
                    rhs: &[$t],
                    out: &mut [$t],
                ) {
                    match metadata {
                        None => {
                            out[..num_els]
                                .par_iter_mut()
                                .enumerate()
                                .for_each(|(i, o)| *o = ($op)(lhs[i], rhs[i]));
                        }
                        Some(meta) => {
                            let dims = &meta[..num_dims];
                            let lhs_strides = &meta[num_dims..2 * num_dims];
                            let rhs_strides = &meta[2 * num_dims..3 * num_dims];
                            let factors = compute_factors(dims);
                            out[..num_els].par_iter_mut().enumerate().for_each(|(i, o)| {
                                let li = offset_for(i, &factors, lhs_strides);
                                let ri = offset_for(i, &factors, rhs_strides);
                                *o = ($op)(lhs[li], rhs[ri]);
                            });
                        }
                    }
                }
            )*
        }
    };
}

/// Elementwise op against a constant; always contiguous.
macro_rules! scalar_op {
    ($name:ident, [$($t:ident),* $(,)?], $op:expr) => {
        paste::paste! {
            $(
                pub fn [<$name _ $t>](num_els: usize, scalar: $t, input: &[$t], out: &mut [$t]) {
                    out[..num_els]
                        .par_iter_mut()
                        .enumerate()
                        .for_each(|(i, o)| *o = ($op)(input[i], scalar));
                }
            )*
        }
    };
}

binary_op!(add, [f16, f32, f64, i32, i64], |a, b| a + b);
binary_op!(sub, [f16, f32, f64, i32, i64], |a, b| a - b);
binary_op!(mul, [f16, f32, f64, i32, i64], |a, b| a * b);
binary_op!(div, [f16, f32, f64, i32, i64], |a, b| a / b);

binary_op!(pow, [f32], |a: f32, b: f32| a.powf(b));
binary_op!(pow, [f64], |a: f64, b: f64| a.powf(b));
binary_op!(pow, [f16], |a: f16, b: f16| f16::from_f32(a.to_f32().powf(b.to_f32())));

scalar_op!(add_scalar, [f16, f32, f64, i32, i64], |a, s| a + s);
scalar_op!(mul_scalar, [f16, f32, f64, i32, i64], |a, s| a * s);

scalar_op!(pow_scalar, [f32], |a: f32, s: f32| a.powf(s));
scalar_op!(pow_scalar, [f64], |a: f64, s: f64| a.powf(s));
scalar_op!(pow_scalar, [f16], |a: f16, s: f16| f16::from_f32(a.to_f32().powf(s.to_f32())));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_contiguous() {
        let lhs = [1.0f32, 2.0, 3.0];
        let rhs = [10.0f32, 20.0, 30.0];
        let mut out = [0.0f32; 3];
        add_f32(3, 1, None, &lhs, &rhs, &mut out);
        assert_eq!(out, [11.0, 22.0, 33.0]);
    }

    #[test]
    fn mul_broadcast_strides() {
        // (3,1) * (1,4) -> (3,4)
        let lhs = [1.0f32, 2.0, 3.0];
        let rhs = [1.0f32, 10.0, 100.0, 1000.0];
        let mut out = [0.0f32; 12];
        let meta = [3, 4, 1, 0, 0, 1];
        mul_f32(12, 2, Some(&meta), &lhs, &rhs, &mut out);
        assert_eq!(&out[..4], &[1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(&out[4..8], &[2.0, 20.0, 200.0, 2000.0]);
        assert_eq!(&out[8..], &[3.0, 30.0, 300.0, 3000.0]);
    }

    #[test]
    fn pow_scalar_square() {
        let input = [2.0f64, 3.0];
        let mut out = [0.0f64; 2];
        pow_scalar_f64(2, 2.0, &input, &mut out);
        assert_eq!(out, [4.0, 9.0]);
    }
}
