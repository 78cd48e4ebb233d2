use crate::utils::compute_factors;
use half::f16;
use rayon::prelude::*;

/// Sums `input` (contiguous, shape `dims`) along axis `dim` into `out`
/// (contiguous, `dims` with axis `dim` removed).
macro_rules! sum_op {
    ([$($t:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<sum _ $t>](dims: &[usize], dim: usize, input: &[$t], out: &mut [$t]) {
                    let inner: usize = dims[dim + 1..].iter().product();
                    let extent = dims[dim];
                    out.par_iter_mut().enumerate().for_each(|(j, o)| {
                        let outer_idx = j / inner;
                        let inner_idx = j % inner;
                        let base = outer_idx * extent * inner + inner_idx;
                        let mut acc: $t = Default::default();
                        for k in 0..extent {
                            acc = acc + input[base + k * inner];
                        }
                        *o = acc;
                    });
                }
            )*
        }
    };
}

macro_rules! sum_all_op {
    ([$($t:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<sum_all _ $t>](input: &[$t]) -> $t {
                    input.par_iter().copied().sum()
                }
            )*
        }
    };
}

sum_op!([f32, f64, i32, i64]);
sum_all_op!([f32, f64, i32, i64]);

// f16 accumulates in f32 to limit rounding drift
pub fn sum_f16(dims: &[usize], dim: usize, input: &[f16], out: &mut [f16]) {
    let inner: usize = dims[dim + 1..].iter().product();
    let extent = dims[dim];
    out.par_iter_mut().enumerate().for_each(|(j, o)| {
        let outer_idx = j / inner;
        let inner_idx = j % inner;
        let base = outer_idx * extent * inner + inner_idx;
        let mut acc = 0.0f32;
        for k in 0..extent {
            acc += input[base + k * inner].to_f32();
        }
        *o = f16::from_f32(acc);
    });
}

pub fn sum_all_f16(input: &[f16]) -> f16 {
    f16::from_f32(input.par_iter().map(|x| x.to_f32()).sum::<f32>())
}

/// Sum-reduces `input` (shape `dims_in`) down to `dims_out`, where every axis
/// of `dims_out` either matches `dims_in` or is 1. This is the gradient
/// counterpart of broadcasting.
macro_rules! sum_to_shape_op {
    ($t:ident, $acc:ty, $to_acc:expr, $from_acc:expr) => {
        paste::paste! {
            pub fn [<sum_to_shape _ $t>](dims_in: &[usize], dims_out: &[usize], input: &[$t], out: &mut [$t]) {
                let in_strides = compute_factors(dims_in);
                let out_factors = compute_factors(dims_out);
                let reduced: Vec<(usize, usize)> = (0..dims_in.len())
                    .filter(|&d| dims_out[d] == 1 && dims_in[d] > 1)
                    .map(|d| (d, dims_in[d]))
                    .collect();

                out.par_iter_mut().enumerate().for_each(|(j, o)| {
                    let mut base = 0;
                    let mut rem = j;
                    for d in 0..dims_out.len() {
                        let digit = rem / out_factors[d];
                        rem %= out_factors[d];
                        base += digit * in_strides[d];
                    }

                    let mut acc: $acc = Default::default();
                    let mut idx = vec![0usize; reduced.len()];
                    'positions: loop {
                        let mut off = base;
                        for (k, &(axis, _)) in reduced.iter().enumerate() {
                            off += idx[k] * in_strides[axis];
                        }
                        acc = acc + ($to_acc)(input[off]);

                        let mut c = reduced.len();
                        loop {
                            if c == 0 {
                                break 'positions;
                            }
                            c -= 1;
                            idx[c] += 1;
                            if idx[c] < reduced[c].1 {
                                break;
                            }
                            idx[c] = 0;
                        }
                    }
                    *o = ($from_acc)(acc);
                });
            }
        }
    };
}

sum_to_shape_op!(f32, f32, |x| x, |x| x);
sum_to_shape_op!(f64, f64, |x| x, |x| x);
sum_to_shape_op!(i32, i32, |x| x, |x| x);
sum_to_shape_op!(i64, i64, |x| x, |x| x);
sum_to_shape_op!(f16, f32, |x: f16| x.to_f32(), f16::from_f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_along_middle_axis() {
        // shape (2, 3, 2), sum over axis 1 -> (2, 2)
        let input: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let mut out = [0.0f32; 4];
        sum_f32(&[2, 3, 2], 1, &input, &mut out);
        assert_eq!(out, [6.0, 9.0, 24.0, 27.0]);
    }

    #[test]
    fn sum_all_matches_serial() {
        let input: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        assert_eq!(sum_all_f64(&input), 5050.0);
    }

    #[test]
    fn sum_to_shape_collapses_broadcast_axes() {
        // (3, 4) -> (3, 1): row sums
        let input: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let mut out = [0.0f32; 3];
        sum_to_shape_f32(&[3, 4], &[3, 1], &input, &mut out);
        assert_eq!(out, [6.0, 22.0, 38.0]);

        // (3, 4) -> (1, 4): column sums
        let mut out = [0.0f32; 4];
        sum_to_shape_f32(&[3, 4], &[1, 4], &input, &mut out);
        assert_eq!(out, [12.0, 15.0, 18.0, 21.0]);
    }

    #[test]
    fn sum_to_shape_identity_when_nothing_reduced() {
        let input = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 4];
        sum_to_shape_f32(&[2, 2], &[2, 2], &input, &mut out);
        assert_eq!(out, input);
    }
}
