use crate::Tensor;
use emgrad_core::{
    array::Array,
    device::{get_default_device, Device},
    dtype::{get_default_dtype, DType},
    error::{Error, Result},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};
use std::sync::Mutex;

static GLOBAL_RNG: Mutex<Option<StdRng>> = Mutex::new(None);

/// Reseeds the process-wide generator; subsequent draws are reproducible.
pub fn seed(seed: u64) {
    let mut guard = GLOBAL_RNG.lock().unwrap_or_else(|e| e.into_inner());
    *guard = Some(StdRng::seed_from_u64(seed));
}

pub(crate) fn with_rng<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    let mut guard = GLOBAL_RNG.lock().unwrap_or_else(|e| e.into_inner());
    let rng = guard.get_or_insert_with(StdRng::from_entropy);
    f(rng)
}

fn sampled_float_tensor(
    shape: &[usize],
    device: Device,
    dtype: DType,
    values: Vec<f64>,
) -> Result<Tensor> {
    let array = Array::from_vec_with_spec(values, shape, device)?;
    let array = if dtype == DType::F64 { array } else { array.astype(dtype)? };
    Ok(Tensor::from_array(array))
}

impl Tensor {
    /// Uniform draws over `[0, 1)`.
    pub fn rand(shape: &[usize]) -> Result<Self> {
        Self::rand_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn rand_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        Self::uniform_with_spec(shape, 0.0, 1.0, device, dtype)
    }

    /// Standard normal draws.
    pub fn randn(shape: &[usize]) -> Result<Self> {
        Self::randn_with_spec(shape, get_default_device(), get_default_dtype())
    }

    pub fn randn_with_spec(shape: &[usize], device: Device, dtype: DType) -> Result<Self> {
        if dtype.is_int() {
            return Err(Error::UnsupportedDType);
        }
        let size: usize = shape.iter().product();
        let normal = Normal::new(0.0f64, 1.0).map_err(|e| Error::External {
            message: e.to_string(),
        })?;
        let values = with_rng(|rng| (0..size).map(|_| normal.sample(rng)).collect::<Vec<f64>>());
        sampled_float_tensor(shape, device, dtype, values)
    }

    pub fn uniform(shape: &[usize], low: f64, high: f64) -> Result<Self> {
        Self::uniform_with_spec(shape, low, high, get_default_device(), get_default_dtype())
    }

    pub fn uniform_with_spec(
        shape: &[usize],
        low: f64,
        high: f64,
        device: Device,
        dtype: DType,
    ) -> Result<Self> {
        if dtype.is_int() {
            return Err(Error::UnsupportedDType);
        }
        if !(low < high) {
            return Err(Error::InvalidArgument(format!(
                "uniform requires low < high, got [{}, {})",
                low, high
            )));
        }
        let size: usize = shape.iter().product();
        let dist = Uniform::new(low, high);
        let values = with_rng(|rng| (0..size).map(|_| dist.sample(rng)).collect::<Vec<f64>>());
        sampled_float_tensor(shape, device, dtype, values)
    }

    /// Integer draws over `[low, high)`, as i64.
    pub fn randint(shape: &[usize], low: i64, high: i64) -> Result<Self> {
        if low >= high {
            return Err(Error::InvalidArgument(format!(
                "randint requires low < high, got [{}, {})",
                low, high
            )));
        }
        let size: usize = shape.iter().product();
        let values = with_rng(|rng| {
            (0..size).map(|_| rng.gen_range(low..high)).collect::<Vec<i64>>()
        });
        let array = Array::from_vec_with_spec(values, shape, get_default_device())?;
        Ok(Tensor::from_array(array))
    }

    pub fn rand_like(src: &Tensor) -> Result<Self> {
        Self::rand_with_spec(src.shape(), src.device(), src.dtype())
    }

    pub fn randn_like(src: &Tensor) -> Result<Self> {
        Self::randn_with_spec(src.shape(), src.device(), src.dtype())
    }

    /// A random permutation of `0..n`, as i64.
    pub fn permutation(n: usize) -> Result<Self> {
        let mut values: Vec<i64> = (0..n as i64).collect();
        with_rng(|rng| values.shuffle(rng));
        let array = Array::from_vec_with_spec(values, &[n], get_default_device())?;
        Ok(Tensor::from_array(array))
    }
}
