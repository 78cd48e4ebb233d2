#![allow(dead_code)]

use emgrad_core::{
    device::{set_default_device, Device},
    error::Result,
};
use emgrad_tensor::Tensor;

pub fn setup_device() {
    set_default_device(Device::CPU);
}

pub fn setup_tensor(values: Vec<f64>, shape: &[usize]) -> Result<Tensor> {
    setup_device();
    Tensor::from_flat_vec(values, shape)
}

pub fn setup_grad_tensor(values: Vec<f64>, shape: &[usize]) -> Result<Tensor> {
    let mut tensor = setup_tensor(values, shape)?;
    tensor.with_grad()?;
    Ok(tensor)
}

pub fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "element {}: {} not within {} of {}",
            i,
            a,
            tolerance,
            e
        );
    }
}

/// Compares analytic gradients against central finite differences.
///
/// `f` must reduce its input to a single-element tensor. The same closure is
/// replayed on perturbed copies, so any op composition works.
pub fn check_gradients<F>(values: &[f64], shape: &[usize], f: F) -> Result<()>
where
    F: Fn(&Tensor) -> Result<Tensor>,
{
    let x = setup_grad_tensor(values.to_vec(), shape)?;
    let y = f(&x)?;
    y.backward()?;
    let analytic = x
        .grad()?
        .expect("input gradient was not materialized")
        .to_flat_vec::<f64>()?;

    let eps = 1e-6;
    for i in 0..values.len() {
        let mut lo = values.to_vec();
        let mut hi = values.to_vec();
        lo[i] -= eps;
        hi[i] += eps;
        let f_lo = f(&setup_tensor(lo, shape)?)?.item()?.as_f64();
        let f_hi = f(&setup_tensor(hi, shape)?)?.item()?.as_f64();
        let numeric = (f_hi - f_lo) / (2.0 * eps);
        assert!(
            (analytic[i] - numeric).abs() < 1e-4,
            "gradient {} mismatch: analytic {} vs numeric {}",
            i,
            analytic[i],
            numeric
        );
    }
    Ok(())
}
