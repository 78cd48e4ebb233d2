pub use crate::core::{
    device::{available_devices, get_default_device, select_device, set_default_device, Device},
    dtype::*,
    error::{Error, Result},
    scalar::Scalar,
};
pub use crate::tensor::{adapter::TensorAdapter, random, Tensor};
