use crate::{adapter::TensorAdapter, Tensor};
use emgrad_core::{
    array::Array,
    device::{get_default_device, Device},
    dtype::{get_default_dtype, DType},
    error::{Error, Result},
    scalar::Scalar,
};

impl Tensor {
    /// Builds a leaf on the default device, keeping the host data's dtype.
    pub fn new<T>(data: T) -> Result<Self>
    where
        T: TensorAdapter,
    {
        let device = get_default_device();
        let dtype = data.dtype();
        Self::new_with_spec(data, device, dtype)
    }

    pub fn new_with_spec<T>(data: T, device: Device, dtype: DType) -> Result<Self>
    where
        T: TensorAdapter,
    {
        let shape = data.to_shape()?;
        let src_dtype = data.dtype();
        let flat = data.to_flat_vec();
        if flat.len() != shape.iter().product::<usize>() {
            return Err(Error::InvalidShape {
                message: format!("ragged input data does not fit shape {:?}", shape),
            });
        }

        let mut array = Array::from_vec_with_spec(flat, &shape, device)?;
        if src_dtype != dtype {
            array = array.astype(dtype)?;
        }
        Ok(Self::from_array(array))
    }

    /// A leaf built from flat host data with an explicit shape.
    pub fn from_flat_vec<T: emgrad_core::array::Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        Ok(Self::from_array(Array::from_vec_with_spec(
            data,
            shape,
            get_default_device(),
        )?))
    }

    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::zeros_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn zeros_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        Ok(Self::from_array(Array::zeros_with_spec(shape, device, dtype)?))
    }

    pub fn zeros_like(src: &Tensor) -> Result<Self> {
        Self::zeros_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::ones_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn ones_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        Ok(Self::from_array(Array::ones_with_spec(shape, device, dtype)?))
    }

    pub fn ones_like(src: &Tensor) -> Result<Self> {
        Self::ones_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn full(shape: &[usize], value: impl Into<Scalar>) -> Result<Self> {
        Self::full_with_spec(shape, value, get_default_device(), get_default_dtype())
    }

    pub fn full_with_spec(
        shape: &[usize],
        value: impl Into<Scalar>,
        device: Device,
        dtype: DType,
    ) -> Result<Self> {
        Ok(Self::from_array(Array::full_with_spec(shape, value, device, dtype)?))
    }

    /// 1-D tensor with values `[start, start+step, ..)` up to but excluding `end`.
    pub fn arange<T>(start: T, end: T, step: T) -> Result<Self>
    where
        T: Into<Scalar> + Copy,
    {
        Self::arange_with_spec(start, end, step, get_default_device(), get_default_dtype())
    }

    pub fn arange_with_spec<T>(start: T, end: T, step: T, device: Device, dtype: DType) -> Result<Self>
    where
        T: Into<Scalar> + Copy,
    {
        let start = start.into().as_f64();
        let end = end.into().as_f64();
        let step = step.into().as_f64();
        if step == 0.0 {
            return Err(Error::InvalidArgument("arange step cannot be zero".to_string()));
        }

        let mut values = Vec::new();
        let mut v = start;
        while (step > 0.0 && v < end) || (step < 0.0 && v > end) {
            values.push(v);
            v += step;
        }

        let n = values.len();
        let array = Array::from_vec_with_spec(values, &[n], device)?.astype(dtype)?;
        Ok(Self::from_array(array))
    }
}
