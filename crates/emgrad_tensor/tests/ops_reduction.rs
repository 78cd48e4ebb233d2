mod utils;

use emgrad_core::error::{Error, Result};
use utils::{assert_close, check_gradients, setup_grad_tensor, setup_tensor};

#[test]
fn sum_along_each_dim() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;

    let rows = x.sum(0, false)?;
    assert_eq!(rows.shape(), &[3]);
    assert_eq!(rows.to_flat_vec::<f64>()?, vec![5.0, 7.0, 9.0]);

    let cols = x.sum(1, false)?;
    assert_eq!(cols.shape(), &[2]);
    assert_eq!(cols.to_flat_vec::<f64>()?, vec![6.0, 15.0]);
    Ok(())
}

#[test]
fn sum_keep_dim_preserves_rank() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let kept = x.sum(1, true)?;
    assert_eq!(kept.shape(), &[2, 1]);
    assert_eq!(kept.to_flat_vec::<f64>()?, vec![6.0, 15.0]);
    Ok(())
}

#[test]
fn sum_dim_out_of_bounds() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0], &[2])?;
    assert!(matches!(x.sum(1, false), Err(Error::DimensionOutOfBounds { .. })));
    Ok(())
}

#[test]
fn sum_all_is_rank_zero() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    let total = x.sum_all()?;
    assert_eq!(total.ndim(), 0);
    assert_eq!(total.item()?.as_f64(), 10.0);
    Ok(())
}

#[test]
fn mean_all_scales_by_count() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0], &[4])?;
    assert_eq!(x.mean_all()?.item()?.as_f64(), 2.5);
    Ok(())
}

#[test]
fn mean_along_dim() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let m = x.mean(1, false)?;
    assert_close(&m.to_flat_vec::<f64>()?, &[2.0, 5.0], 1e-12);
    Ok(())
}

#[test]
fn sum_backward_broadcasts_the_seed() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let y = x.sum(1, false)?.sum_all()?;
    y.backward()?;

    let grad = x.grad()?.unwrap();
    assert_eq!(grad.shape(), &[2, 3]);
    assert_eq!(grad.to_flat_vec::<f64>()?, vec![1.0; 6]);
    Ok(())
}

#[test]
fn sum_gradients() -> Result<()> {
    check_gradients(&[1.0, -2.0, 3.0, 0.5, 2.5, -1.5], &[2, 3], |x| {
        x.sum(0, false)?.pow_scalar(2.0)?.sum_all()
    })
}

#[test]
fn sum_keep_dim_gradients() -> Result<()> {
    check_gradients(&[1.0, -2.0, 3.0, 0.5], &[2, 2], |x| {
        x.sum(1, true)?.pow_scalar(2.0)?.sum_all()
    })
}

#[test]
fn mean_gradients() -> Result<()> {
    check_gradients(&[2.0, -1.0, 4.0, 0.5], &[4], |x| {
        x.pow_scalar(2.0)?.mean_all()
    })
}
