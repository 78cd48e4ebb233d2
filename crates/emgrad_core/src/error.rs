use crate::{device::Device, dtype::DType};
use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidDevice(String),
    DeviceUnavailable(String),
    DeviceMismatch {
        expected: Device,
        got: Device,
    },
    DTypeMismatch {
        expected: DType,
        got: DType,
    },
    UnsupportedDType,
    InvalidArgument(String),
    InvalidShape {
        message: String,
    },
    ShapeMismatch {
        expected: usize,
        got: usize,
        msg: String,
    },
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    DimensionOutOfBounds {
        dim: i32,
        ndim: usize,
    },
    CacheEmpty {
        op: String,
    },
    NotDifferentiable,
    GradLocked,
    //
    #[cfg(feature = "serde")]
    SerializationError(String),
    #[cfg(feature = "serde")]
    DeserializationError(String),
    //
    Internal {
        message: String,
    },
    External {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDevice(msg) => write!(f, "Invalid device: {}", msg),
            Self::DeviceUnavailable(msg) => write!(f, "Device unavailable: {}", msg),
            Self::DeviceMismatch { expected, got } => {
                write!(f, "Device mismatch: expected {}, got {}", expected.name(), got.name())
            }
            Self::DTypeMismatch { expected, got } => {
                write!(f, "DType mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::UnsupportedDType => write!(f, "Unsupported data type"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::InvalidShape { message } => write!(f, "Invalid shape: {}", message),
            Self::ShapeMismatch { expected, got, msg } => {
                write!(f, "Shape mismatch ({}): expected {}, got {}", msg, expected, got)
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {:?}, got {:?}", expected, got)
            }
            Self::DimensionOutOfBounds { dim, ndim } => {
                write!(
                    f,
                    "Dimension out of bounds: dimension {} is not valid for tensor with {} dimensions",
                    dim, ndim
                )
            }
            Self::CacheEmpty { op } => {
                write!(f, "Operator cache is empty: backward on '{}' without a matching forward", op)
            }
            Self::NotDifferentiable => write!(f, "Tensor does not require grad"),
            Self::GradLocked => write!(f, "Grad is locked"),
            #[cfg(feature = "serde")]
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            #[cfg(feature = "serde")]
            Self::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
            Self::External { message } => write!(f, "External error: {}", message),
        }
    }
}

impl std::error::Error for Error {}
