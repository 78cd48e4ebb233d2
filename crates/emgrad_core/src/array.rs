use crate::{
    be,
    device::Device,
    dtype::DType,
    error::{Error, Result},
    layout,
    scalar::Scalar,
};
use half::f16;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayStorage {
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl ArrayStorage {
    pub fn dtype(&self) -> DType {
        match self {
            Self::F16(_) => DType::F16,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::F16(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A native element type an [`Array`] can be built from or extracted into.
pub trait Element: Copy + Send + Sync + 'static {
    const DTYPE: DType;
    fn into_storage(data: Vec<Self>) -> ArrayStorage;
    fn as_slice(storage: &ArrayStorage) -> Option<&[Self]>;
    fn from_scalar(scalar: Scalar) -> Self;
}

macro_rules! impl_element {
    ($($t:ident => $variant:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$variant;

                fn into_storage(data: Vec<Self>) -> ArrayStorage {
                    ArrayStorage::$variant(data)
                }

                fn as_slice(storage: &ArrayStorage) -> Option<&[Self]> {
                    match storage {
                        ArrayStorage::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn from_scalar(scalar: Scalar) -> Self {
                    paste::paste! { scalar.[<as_ $t>]() }
                }
            }
        )*
    };
}

impl_element! {
    f16 => F16,
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
}

/// An owned, contiguous, device-resident N-d value. The autograd core treats
/// this as opaque: it only ever invokes the arithmetic and shape operations
/// below, all of which route through [`crate::be`] for the array's device.
#[derive(Clone, PartialEq)]
pub struct Array {
    storage: ArrayStorage,
    shape: Vec<usize>,
    device: Device,
}

fn check_alloc_device(device: Device) -> Result<()> {
    if device.is_available() {
        Ok(())
    } else {
        Err(Error::DeviceUnavailable(device.name()))
    }
}

impl Array {
    // construction

    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        Self::from_vec_with_spec(data, shape, Device::CPU)
    }

    pub fn from_vec_with_spec<T: Element>(data: Vec<T>, shape: &[usize], device: Device) -> Result<Self> {
        check_alloc_device(device)?;
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(Error::InvalidShape {
                message: format!("{} elements do not fit shape {:?}", data.len(), shape),
            });
        }
        Ok(Self {
            storage: T::into_storage(data),
            shape: shape.to_vec(),
            device,
        })
    }

    pub fn zeros_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        Self::full_with_spec(shape, Scalar::F64(0.0), device, dtype)
    }

    pub fn ones_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        Self::full_with_spec(shape, Scalar::F64(1.0), device, dtype)
    }

    pub fn full_with_spec(shape: &[usize], value: impl Into<Scalar>, device: Device, dtype: DType) -> Result<Self> {
        check_alloc_device(device)?;
        let size: usize = shape.iter().product();
        let value = value.into();
        let storage = match dtype {
            DType::F16 => ArrayStorage::F16(vec![value.as_f16(); size]),
            DType::F32 => ArrayStorage::F32(vec![value.as_f32(); size]),
            DType::F64 => ArrayStorage::F64(vec![value.as_f64(); size]),
            DType::I32 => ArrayStorage::I32(vec![value.as_i32(); size]),
            DType::I64 => ArrayStorage::I64(vec![value.as_i64(); size]),
        };
        Ok(Self {
            storage,
            shape: shape.to_vec(),
            device,
        })
    }

    pub fn zeros_like(src: &Array) -> Result<Self> {
        Self::zeros_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn ones_like(src: &Array) -> Result<Self> {
        Self::ones_with_spec(src.shape(), src.device(), src.dtype())
    }

    // accessors

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn storage(&self) -> &ArrayStorage {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut ArrayStorage {
        &mut self.storage
    }

    pub fn item(&self) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(Error::InvalidArgument(format!(
                "item() can only be called on an array with a single element, but got {} elements",
                self.size()
            )));
        }
        Ok(match &self.storage {
            ArrayStorage::F16(v) => Scalar::F16(v[0]),
            ArrayStorage::F32(v) => Scalar::F32(v[0]),
            ArrayStorage::F64(v) => Scalar::F64(v[0]),
            ArrayStorage::I32(v) => Scalar::I32(v[0]),
            ArrayStorage::I64(v) => Scalar::I64(v[0]),
        })
    }

    pub fn to_flat_vec<T: Element>(&self) -> Result<Vec<T>> {
        let converted = if self.dtype() == T::DTYPE {
            self.clone()
        } else {
            self.astype(T::DTYPE)?
        };
        T::as_slice(&converted.storage)
            .map(|s| s.to_vec())
            .ok_or(Error::Internal {
                message: "astype produced an unexpected storage variant".to_string(),
            })
    }

    // dtype / device movement

    fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.storage {
            ArrayStorage::F16(v) => Box::new(v.iter().map(|x| x.to_f64())),
            ArrayStorage::F32(v) => Box::new(v.iter().map(|&x| x as f64)),
            ArrayStorage::F64(v) => Box::new(v.iter().copied()),
            ArrayStorage::I32(v) => Box::new(v.iter().map(|&x| x as f64)),
            ArrayStorage::I64(v) => Box::new(v.iter().map(|&x| x as f64)),
        }
    }

    pub fn astype(&self, dtype: DType) -> Result<Self> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        let storage = match dtype {
            DType::F16 => ArrayStorage::F16(self.iter_f64().map(f16::from_f64).collect()),
            DType::F32 => ArrayStorage::F32(self.iter_f64().map(|x| x as f32).collect()),
            DType::F64 => ArrayStorage::F64(self.iter_f64().collect()),
            DType::I32 => ArrayStorage::I32(self.iter_f64().map(|x| x as i32).collect()),
            DType::I64 => ArrayStorage::I64(self.iter_f64().map(|x| x as i64).collect()),
        };
        Ok(Self {
            storage,
            shape: self.shape.clone(),
            device: self.device,
        })
    }

    /// No-op when already resident on the target.
    pub fn to_device(&self, device: Device) -> Result<Self> {
        if device == self.device {
            return Ok(self.clone());
        }
        check_alloc_device(device)?;
        let mut moved = self.clone();
        moved.device = device;
        Ok(moved)
    }

    // elementwise binary (broadcasting)

    fn binary_op(&self, rhs: &Array, f: be::BinaryFn) -> Result<Self> {
        if self.device != rhs.device {
            return Err(Error::DeviceMismatch {
                expected: self.device,
                got: rhs.device,
            });
        }
        if self.dtype() != rhs.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                got: rhs.dtype(),
            });
        }

        let out_shape = layout::broadcast_shape(&self.shape, &rhs.shape)?;
        let num_els: usize = out_shape.iter().product();
        let num_dims = out_shape.len();
        let mut out = Self::zeros_with_spec(&out_shape, self.device, self.dtype())?;

        let metadata = if self.shape == out_shape && rhs.shape == out_shape {
            None
        } else {
            let mut meta = out_shape.clone();
            meta.extend(layout::broadcast_strides(&self.shape, &out_shape));
            meta.extend(layout::broadcast_strides(&rhs.shape, &out_shape));
            Some(meta)
        };

        f(&mut out, self, rhs, num_els, num_dims, metadata.as_deref())?;
        Ok(out)
    }

    pub fn add(&self, rhs: &Array) -> Result<Self> {
        self.binary_op(rhs, be::ops::binary::add)
    }

    pub fn sub(&self, rhs: &Array) -> Result<Self> {
        self.binary_op(rhs, be::ops::binary::sub)
    }

    pub fn mul(&self, rhs: &Array) -> Result<Self> {
        self.binary_op(rhs, be::ops::binary::mul)
    }

    /// Integer operands divide in f32, like the original true-divide.
    pub fn div(&self, rhs: &Array) -> Result<Self> {
        if self.dtype().is_int() && rhs.dtype().is_int() {
            return self.astype(DType::F32)?.binary_op(&rhs.astype(DType::F32)?, be::ops::binary::div);
        }
        self.binary_op(rhs, be::ops::binary::div)
    }

    pub fn pow(&self, rhs: &Array) -> Result<Self> {
        self.binary_op(rhs, be::ops::binary::pow)
    }

    // elementwise against a constant

    fn scalar_op(
        &self,
        scalar: Scalar,
        f: fn(&mut Array, &Array, Scalar, usize) -> Result<()>,
    ) -> Result<Self> {
        let mut out = Self::zeros_like(self)?;
        f(&mut out, self, scalar, self.size())?;
        Ok(out)
    }

    pub fn add_scalar(&self, scalar: impl Into<Scalar>) -> Result<Self> {
        self.scalar_op(scalar.into(), be::ops::binary::add_scalar)
    }

    pub fn mul_scalar(&self, scalar: impl Into<Scalar>) -> Result<Self> {
        self.scalar_op(scalar.into(), be::ops::binary::mul_scalar)
    }

    pub fn pow_scalar(&self, scalar: impl Into<Scalar>) -> Result<Self> {
        self.scalar_op(scalar.into(), be::ops::binary::pow_scalar)
    }

    // elementwise unary

    fn unary_op(&self, f: be::UnaryFn) -> Result<Self> {
        let mut out = Self::zeros_like(self)?;
        f(&mut out, self, self.size())?;
        Ok(out)
    }

    pub fn neg(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::neg)
    }

    pub fn abs(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::abs)
    }

    pub fn sign(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::sign)
    }

    pub fn exp(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::exp)
    }

    pub fn ln(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::ln)
    }

    pub fn sqrt(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::sqrt)
    }

    pub fn tanh(&self) -> Result<Self> {
        self.unary_op(be::ops::unary::tanh)
    }

    // reductions

    pub fn sum(&self, dim: usize, keep_dim: bool) -> Result<Self> {
        if dim >= self.ndim() {
            return Err(Error::DimensionOutOfBounds {
                dim: dim as i32,
                ndim: self.ndim(),
            });
        }

        let mut reduced_shape = self.shape.clone();
        reduced_shape.remove(dim);
        let mut out = Self::zeros_with_spec(&reduced_shape, self.device, self.dtype())?;
        be::ops::reduction::sum(&mut out, self, &self.shape, dim)?;

        if keep_dim {
            let mut kept = self.shape.clone();
            kept[dim] = 1;
            out.shape = kept;
        }
        Ok(out)
    }

    /// Scalar-shaped (rank 0) total.
    pub fn sum_all(&self) -> Result<Self> {
        let total = be::ops::reduction::sum_all(self)?;
        Self::full_with_spec(&[], total, self.device, self.dtype())
    }

    /// Sum-reduces down to `target`, which must be reachable from `self` by
    /// broadcasting. The gradient counterpart of [`Array::broadcast_to`].
    pub fn sum_to_shape(&self, target: &[usize]) -> Result<Self> {
        if target == self.shape.as_slice() {
            return Ok(self.clone());
        }
        if target.len() > self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.shape.clone(),
                got: target.to_vec(),
            });
        }

        let padded = layout::pad_shape(target, self.ndim());
        for (&t, &s) in padded.iter().zip(self.shape.iter()) {
            if t != s && t != 1 {
                return Err(Error::DimensionMismatch {
                    expected: self.shape.clone(),
                    got: target.to_vec(),
                });
            }
        }

        let mut out = Self::zeros_with_spec(&padded, self.device, self.dtype())?;
        be::ops::reduction::sum_to_shape(&mut out, self, &self.shape, &padded)?;
        out.shape = target.to_vec();
        Ok(out)
    }

    // matmul

    pub fn matmul(&self, rhs: &Array) -> Result<Self> {
        if self.device != rhs.device {
            return Err(Error::DeviceMismatch {
                expected: self.device,
                got: rhs.device,
            });
        }
        if self.dtype() != rhs.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                got: rhs.dtype(),
            });
        }
        if self.ndim() != 2 || rhs.ndim() != 2 {
            return Err(Error::InvalidShape {
                message: format!(
                    "matmul expects 2-d operands, got {:?} and {:?}",
                    self.shape, rhs.shape
                ),
            });
        }
        let (m, k) = (self.shape[0], self.shape[1]);
        let (k2, n) = (rhs.shape[0], rhs.shape[1]);
        if k != k2 {
            return Err(Error::InvalidShape {
                message: format!("matmul inner dimensions differ: {:?} and {:?}", self.shape, rhs.shape),
            });
        }

        let mut out = Self::zeros_with_spec(&[m, n], self.device, self.dtype())?;
        be::ops::matmul::matmul(&mut out, self, rhs, m, k, n)?;
        Ok(out)
    }

    // shape

    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let new_size: usize = shape.iter().product();
        if new_size != self.size() {
            return Err(Error::InvalidShape {
                message: format!("Cannot reshape array of size {} to shape {:?}", self.size(), shape),
            });
        }
        let mut out = self.clone();
        out.shape = shape.to_vec();
        Ok(out)
    }

    pub fn transpose(&self) -> Result<Self> {
        if self.ndim() != 2 {
            return Err(Error::InvalidShape {
                message: format!("transpose expects a 2-d array, got {:?}", self.shape),
            });
        }
        let (m, n) = (self.shape[0], self.shape[1]);
        let mut out = Self::zeros_with_spec(&[n, m], self.device, self.dtype())?;
        // transposed dims with the source's strides swapped accordingly
        let metadata = [n, m, 1, n];
        be::ops::copy::copy_strided(&mut out, self, m * n, 2, &metadata)?;
        Ok(out)
    }

    pub fn broadcast_to(&self, target: &[usize]) -> Result<Self> {
        let broadcast = layout::broadcast_shape(&self.shape, target)?;
        if broadcast != target {
            return Err(Error::InvalidShape {
                message: format!("Cannot broadcast shape {:?} to {:?}", self.shape, target),
            });
        }
        let num_els: usize = target.iter().product();
        let mut out = Self::zeros_with_spec(target, self.device, self.dtype())?;
        let mut metadata = target.to_vec();
        metadata.extend(layout::broadcast_strides(&self.shape, target));
        be::ops::copy::copy_strided(&mut out, self, num_els, target.len(), &metadata)?;
        Ok(out)
    }

    // formatting

    fn format_element(&self, i: usize) -> String {
        match &self.storage {
            ArrayStorage::F16(v) => format!("{:.4}", v[i].to_f32()),
            ArrayStorage::F32(v) => format!("{:.4}", v[i]),
            ArrayStorage::F64(v) => format!("{:.4}", v[i]),
            ArrayStorage::I32(v) => format!("{}", v[i]),
            ArrayStorage::I64(v) => format!("{}", v[i]),
        }
    }

    fn format_data(&self) -> String {
        fn rec(arr: &Array, dim: usize, offset: usize, strides: &[usize]) -> String {
            if dim == arr.ndim() {
                return arr.format_element(offset);
            }
            let parts: Vec<String> = (0..arr.shape[dim])
                .map(|i| rec(arr, dim + 1, offset + i * strides[dim], strides))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        let strides = layout::compute_strides(&self.shape);
        rec(self, 0, 0, &strides)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_data())
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Array(shape={:?}, dtype={}, device={}, data={})",
            self.shape,
            self.dtype().as_str(),
            self.device,
            self.format_data()
        )
    }
}
