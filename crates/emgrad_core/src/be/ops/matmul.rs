use super::check_cpu;
use crate::{
    array::{Array, ArrayStorage},
    error::{Error, Result},
};

/// `out = lhs . rhs` with row-major (m, k) x (k, n) operands.
pub fn matmul(out: &mut Array, lhs: &Array, rhs: &Array, m: usize, k: usize, n: usize) -> Result<()> {
    check_cpu(out)?;
    match (out.storage_mut(), lhs.storage(), rhs.storage()) {
        (ArrayStorage::F16(o), ArrayStorage::F16(l), ArrayStorage::F16(r)) => {
            emgrad_cpu::ops::matmul::matmul_f16(m, k, n, l, r, o)
        }
        (ArrayStorage::F32(o), ArrayStorage::F32(l), ArrayStorage::F32(r)) => {
            emgrad_cpu::ops::matmul::matmul_f32(m, k, n, l, r, o)
        }
        (ArrayStorage::F64(o), ArrayStorage::F64(l), ArrayStorage::F64(r)) => {
            emgrad_cpu::ops::matmul::matmul_f64(m, k, n, l, r, o)
        }
        (ArrayStorage::I32(o), ArrayStorage::I32(l), ArrayStorage::I32(r)) => {
            emgrad_cpu::ops::matmul::matmul_i32(m, k, n, l, r, o)
        }
        (ArrayStorage::I64(o), ArrayStorage::I64(l), ArrayStorage::I64(r)) => {
            emgrad_cpu::ops::matmul::matmul_i64(m, k, n, l, r, o)
        }
        _ => return Err(Error::UnsupportedDType),
    }
    Ok(())
}
