#![allow(non_upper_case_globals)]

pub const float16: DType = DType::F16;
pub const half: DType = DType::F16;
pub const float32: DType = DType::F32;
pub const float64: DType = DType::F64;
pub const int32: DType = DType::I32;
pub const int64: DType = DType::I64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    F16,
    F32,
    F64,
    I32,
    I64,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    pub fn parse(descriptor: &str) -> crate::error::Result<Self> {
        match descriptor {
            "f16" | "float16" | "half" => Ok(Self::F16),
            "f32" | "float32" => Ok(Self::F32),
            "f64" | "float64" => Ok(Self::F64),
            "i32" | "int32" => Ok(Self::I32),
            "i64" | "int64" => Ok(Self::I64),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown dtype: {}",
                other
            ))),
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::F16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
            Self::I32 => 4,
            Self::I64 => 8,
        }
    }

    pub fn is_int(&self) -> bool {
        match self {
            Self::F16 | Self::F32 | Self::F64 => false,
            Self::I32 | Self::I64 => true,
        }
    }

    pub fn is_float(&self) -> bool {
        !self.is_int()
    }
}

thread_local! {
    static DEFAULT_DTYPE: std::cell::Cell<DType> = const { std::cell::Cell::new(DType::F32) };
}

pub fn get_default_dtype() -> DType {
    DEFAULT_DTYPE.with(|d| d.get())
}

pub fn set_default_dtype(dtype: DType) {
    DEFAULT_DTYPE.with(|d| d.set(dtype));
}
