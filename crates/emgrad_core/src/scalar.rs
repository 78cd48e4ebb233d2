use crate::dtype::DType;
use half::f16;

macro_rules! numeric_variants {
    ($($variant:ident => $type:ty),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Scalar {
            $($variant($type),)*
        }

        impl Scalar {
            #[inline]
            pub fn new<T: Into<Self>>(value: T) -> Self {
                value.into()
            }

            #[inline]
            pub fn dtype(&self) -> DType {
                match self {
                    $(Self::$variant(_) => DType::$variant,)*
                }
            }

            #[inline]
            pub fn as_f64(&self) -> f64 {
                match *self {
                    Self::F16(x) => x.to_f64(),
                    Self::F32(x) => x as f64,
                    Self::F64(x) => x,
                    Self::I32(x) => x as f64,
                    Self::I64(x) => x as f64,
                }
            }

            #[inline]
            pub fn as_f32(&self) -> f32 {
                self.as_f64() as f32
            }

            #[inline]
            pub fn as_f16(&self) -> f16 {
                f16::from_f64(self.as_f64())
            }

            #[inline]
            pub fn as_i64(&self) -> i64 {
                match *self {
                    Self::F16(x) => x.to_f64() as i64,
                    Self::F32(x) => x as i64,
                    Self::F64(x) => x as i64,
                    Self::I32(x) => x as i64,
                    Self::I64(x) => x,
                }
            }

            #[inline]
            pub fn as_i32(&self) -> i32 {
                self.as_i64() as i32
            }

            #[inline]
            pub fn is_int(&self) -> bool {
                self.dtype().is_int()
            }

            #[inline]
            pub fn is_float(&self) -> bool {
                self.dtype().is_float()
            }
        }

        $(
            impl From<$type> for Scalar {
                fn from(value: $type) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

numeric_variants! {
    F16 => f16,
    F32 => f32,
    F64 => f64,
    I32 => i32,
    I64 => i64,
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Self::I64(value as i64)
    }
}
