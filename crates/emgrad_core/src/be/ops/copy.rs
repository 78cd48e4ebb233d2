use super::check_cpu;
use crate::{
    array::{Array, ArrayStorage},
    error::{Error, Result},
};

/// Gathers a strided view of `src` into the contiguous `out`. `metadata` is
/// `dims ++ src_strides` over `num_dims` dimensions.
pub fn copy_strided(out: &mut Array, src: &Array, num_els: usize, num_dims: usize, metadata: &[usize]) -> Result<()> {
    check_cpu(out)?;
    match (out.storage_mut(), src.storage()) {
        (ArrayStorage::F16(o), ArrayStorage::F16(s)) => {
            emgrad_cpu::ops::copy::copy_strided_f16(num_els, num_dims, metadata, s, o)
        }
        (ArrayStorage::F32(o), ArrayStorage::F32(s)) => {
            emgrad_cpu::ops::copy::copy_strided_f32(num_els, num_dims, metadata, s, o)
        }
        (ArrayStorage::F64(o), ArrayStorage::F64(s)) => {
            emgrad_cpu::ops::copy::copy_strided_f64(num_els, num_dims, metadata, s, o)
        }
        (ArrayStorage::I32(o), ArrayStorage::I32(s)) => {
            emgrad_cpu::ops::copy::copy_strided_i32(num_els, num_dims, metadata, s, o)
        }
        (ArrayStorage::I64(o), ArrayStorage::I64(s)) => {
            emgrad_cpu::ops::copy::copy_strided_i64(num_els, num_dims, metadata, s, o)
        }
        _ => return Err(Error::UnsupportedDType),
    }
    Ok(())
}
