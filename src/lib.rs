pub mod prelude;

pub use emgrad_core as core;
#[cfg(feature = "nn")]
pub use emgrad_nn as nn;
pub use emgrad_tensor as tensor;

pub use emgrad_core::dtype::{float16, float32, float64, half, int32, int64};
