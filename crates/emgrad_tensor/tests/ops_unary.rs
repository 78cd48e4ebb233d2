mod utils;

use emgrad_core::error::Result;
use utils::{assert_close, check_gradients, setup_tensor};

#[test]
fn neg_and_abs_forward() -> Result<()> {
    let a = setup_tensor(vec![-1.5, 0.0, 2.5], &[3])?;
    assert_eq!(a.neg()?.to_flat_vec::<f64>()?, vec![1.5, 0.0, -2.5]);
    assert_eq!(a.abs()?.to_flat_vec::<f64>()?, vec![1.5, 0.0, 2.5]);
    Ok(())
}

#[test]
fn sign_forward_is_zero_at_zero() -> Result<()> {
    let a = setup_tensor(vec![-3.0, 0.0, 0.5], &[3])?;
    assert_eq!(a.sign()?.to_flat_vec::<f64>()?, vec![-1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn exp_ln_forward() -> Result<()> {
    let a = setup_tensor(vec![0.0, 1.0], &[2])?;
    assert_close(
        &a.exp()?.to_flat_vec::<f64>()?,
        &[1.0, std::f64::consts::E],
        1e-12,
    );

    let b = setup_tensor(vec![1.0, std::f64::consts::E], &[2])?;
    assert_close(&b.ln()?.to_flat_vec::<f64>()?, &[0.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn sqrt_tanh_forward() -> Result<()> {
    let a = setup_tensor(vec![4.0, 9.0], &[2])?;
    assert_close(&a.sqrt()?.to_flat_vec::<f64>()?, &[2.0, 3.0], 1e-12);

    let b = setup_tensor(vec![0.0, 100.0], &[2])?;
    let tanh = b.tanh()?.to_flat_vec::<f64>()?;
    assert_close(&tanh, &[0.0, 1.0], 1e-9);
    Ok(())
}

#[test]
fn neg_gradients() -> Result<()> {
    check_gradients(&[1.0, -2.0, 3.0], &[3], |x| x.neg()?.sum_all())
}

#[test]
fn abs_gradients_away_from_zero() -> Result<()> {
    check_gradients(&[1.0, -2.0, 3.0], &[3], |x| x.abs()?.sum_all())
}

#[test]
fn exp_gradients() -> Result<()> {
    check_gradients(&[0.3, -1.2, 0.9], &[3], |x| x.exp()?.sum_all())
}

#[test]
fn ln_gradients() -> Result<()> {
    check_gradients(&[0.5, 1.5, 3.0], &[3], |x| x.ln()?.sum_all())
}

#[test]
fn sqrt_gradients() -> Result<()> {
    check_gradients(&[0.5, 2.0, 9.0], &[3], |x| x.sqrt()?.sum_all())
}

#[test]
fn tanh_gradients() -> Result<()> {
    check_gradients(&[-1.0, 0.0, 0.7], &[3], |x| x.tanh()?.sum_all())
}

#[test]
fn composed_unary_gradients() -> Result<()> {
    // f(x) = sum(exp(tanh(x))) exercises cached-output chaining
    check_gradients(&[-0.5, 0.2, 1.1], &[3], |x| x.tanh()?.exp()?.sum_all())
}
