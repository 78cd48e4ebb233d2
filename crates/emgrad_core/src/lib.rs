pub mod array;
pub mod be;
pub mod device;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod scalar;

pub use emgrad_cpu as cpu;
