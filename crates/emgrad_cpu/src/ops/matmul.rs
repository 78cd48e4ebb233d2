use half::f16;
use rayon::prelude::*;

/// `out[m, n] = lhs[m, k] . rhs[k, n]`, all row-major contiguous.
/// Parallelized over output rows.
macro_rules! matmul_op {
    ([$($t:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<matmul _ $t>](m: usize, k: usize, n: usize, lhs: &[$t], rhs: &[$t], out: &mut [$t]) {
                    debug_assert_eq!(lhs.len(), m * k);
                    debug_assert_eq!(rhs.len(), k * n);
                    out[..m * n].par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                        for (j, cell) in row.iter_mut().enumerate() {
                            let mut acc: $t = Default::default();
                            for p in 0..k {
                                acc = acc + lhs[i * k + p] * rhs[p * n + j];
                            }
                            *cell = acc;
                        }
                    });
                }
            )*
        }
    };
}

matmul_op!([f32, f64, i32, i64]);

pub fn matmul_f16(m: usize, k: usize, n: usize, lhs: &[f16], rhs: &[f16], out: &mut [f16]) {
    debug_assert_eq!(lhs.len(), m * k);
    debug_assert_eq!(rhs.len(), k * n);
    out[..m * n].par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        for (j, cell) in row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for p in 0..k {
                acc += lhs[i * k + p].to_f32() * rhs[p * n + j].to_f32();
            }
            *cell = f16::from_f32(acc);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two() {
        let lhs = [1.0f32, 2.0, 3.0, 4.0];
        let rhs = [5.0f32, 6.0, 7.0, 8.0];
        let mut out = [0.0f32; 4];
        matmul_f32(2, 2, 2, &lhs, &rhs, &mut out);
        assert_eq!(out, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn rectangular() {
        // (1,3) x (3,2)
        let lhs = [1.0f64, 2.0, 3.0];
        let rhs = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mut out = [0.0f64; 2];
        matmul_f64(1, 3, 2, &lhs, &rhs, &mut out);
        assert_eq!(out, [14.0, 32.0]);
    }
}
