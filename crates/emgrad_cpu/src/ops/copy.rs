use crate::utils::{compute_factors, offset_for};
use half::f16;
use rayon::prelude::*;

/// Gathers a strided view of `src` into a contiguous `out`. `metadata` is
/// `dims[num_dims] ++ src_strides[num_dims]`; stride 0 repeats an axis
/// (broadcast), permuted strides transpose.
macro_rules! copy_strided_op {
    ([$($t:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<copy_strided _ $t>](
                    num_els: usize,
                    num_dims: usize,
                    metadata: &[usize],
                    src: &[$t],
                    out: &mut [$t],
                ) {
                    let dims = &metadata[..num_dims];
                    let src_strides = &metadata[num_dims..2 * num_dims];
                    let factors = compute_factors(dims);
                    out[..num_els]
                        .par_iter_mut()
                        .enumerate()
                        .for_each(|(i, o)| *o = src[offset_for(i, &factors, src_strides)]);
                }
            )*
        }
    };
}

copy_strided_op!([f16, f32, f64, i32, i64]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_via_strides() {
        // (2,3) row-major transposed to (3,2)
        let src = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0f32; 6];
        let meta = [3, 2, 1, 3];
        copy_strided_f32(6, 2, &meta, &src, &mut out);
        assert_eq!(out, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn broadcast_via_zero_stride() {
        // (3,) broadcast to (2,3)
        let src = [7.0f64, 8.0, 9.0];
        let mut out = [0.0f64; 6];
        let meta = [2, 3, 0, 1];
        copy_strided_f64(6, 2, &meta, &src, &mut out);
        assert_eq!(out, [7.0, 8.0, 9.0, 7.0, 8.0, 9.0]);
    }
}
