use super::check_cpu;
use crate::{
    array::{Array, ArrayStorage},
    error::{Error, Result},
    scalar::Scalar,
};

/// Sum along `dim` of a contiguous `input` with shape `dims` into `out`
/// (shape `dims` minus `dim`).
pub fn sum(out: &mut Array, input: &Array, dims: &[usize], dim: usize) -> Result<()> {
    check_cpu(out)?;
    match (out.storage_mut(), input.storage()) {
        (ArrayStorage::F16(o), ArrayStorage::F16(i)) => emgrad_cpu::ops::reduction::sum_f16(dims, dim, i, o),
        (ArrayStorage::F32(o), ArrayStorage::F32(i)) => emgrad_cpu::ops::reduction::sum_f32(dims, dim, i, o),
        (ArrayStorage::F64(o), ArrayStorage::F64(i)) => emgrad_cpu::ops::reduction::sum_f64(dims, dim, i, o),
        (ArrayStorage::I32(o), ArrayStorage::I32(i)) => emgrad_cpu::ops::reduction::sum_i32(dims, dim, i, o),
        (ArrayStorage::I64(o), ArrayStorage::I64(i)) => emgrad_cpu::ops::reduction::sum_i64(dims, dim, i, o),
        _ => return Err(Error::UnsupportedDType),
    }
    Ok(())
}

pub fn sum_all(input: &Array) -> Result<Scalar> {
    check_cpu(input)?;
    Ok(match input.storage() {
        ArrayStorage::F16(i) => Scalar::F16(emgrad_cpu::ops::reduction::sum_all_f16(i)),
        ArrayStorage::F32(i) => Scalar::F32(emgrad_cpu::ops::reduction::sum_all_f32(i)),
        ArrayStorage::F64(i) => Scalar::F64(emgrad_cpu::ops::reduction::sum_all_f64(i)),
        ArrayStorage::I32(i) => Scalar::I32(emgrad_cpu::ops::reduction::sum_all_i32(i)),
        ArrayStorage::I64(i) => Scalar::I64(emgrad_cpu::ops::reduction::sum_all_i64(i)),
    })
}

/// Sum-reduce `input` (shape `dims_in`) to `out` (shape `dims_out`, same
/// rank, each axis equal or 1).
pub fn sum_to_shape(out: &mut Array, input: &Array, dims_in: &[usize], dims_out: &[usize]) -> Result<()> {
    check_cpu(out)?;
    match (out.storage_mut(), input.storage()) {
        (ArrayStorage::F16(o), ArrayStorage::F16(i)) => {
            emgrad_cpu::ops::reduction::sum_to_shape_f16(dims_in, dims_out, i, o)
        }
        (ArrayStorage::F32(o), ArrayStorage::F32(i)) => {
            emgrad_cpu::ops::reduction::sum_to_shape_f32(dims_in, dims_out, i, o)
        }
        (ArrayStorage::F64(o), ArrayStorage::F64(i)) => {
            emgrad_cpu::ops::reduction::sum_to_shape_f64(dims_in, dims_out, i, o)
        }
        (ArrayStorage::I32(o), ArrayStorage::I32(i)) => {
            emgrad_cpu::ops::reduction::sum_to_shape_i32(dims_in, dims_out, i, o)
        }
        (ArrayStorage::I64(o), ArrayStorage::I64(i)) => {
            emgrad_cpu::ops::reduction::sum_to_shape_i64(dims_in, dims_out, i, o)
        }
        _ => return Err(Error::UnsupportedDType),
    }
    Ok(())
}
