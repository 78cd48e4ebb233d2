pub mod binary;
pub mod copy;
pub mod matmul;
pub mod reduction;
pub mod unary;

use crate::{array::Array, device::Device, error::Error, error::Result};

pub(crate) fn check_cpu(array: &Array) -> Result<()> {
    match array.device() {
        Device::CPU => Ok(()),
        Device::CUDA(id) => Err(Error::DeviceUnavailable(format!("cuda:{}", id))),
    }
}
