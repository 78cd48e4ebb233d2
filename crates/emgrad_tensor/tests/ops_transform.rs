mod utils;

use emgrad_core::error::{Error, Result};
use utils::{check_gradients, setup_grad_tensor, setup_tensor};

#[test]
fn reshape_forward() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let r = x.reshape(&[3, 2])?;
    assert_eq!(r.shape(), &[3, 2]);
    assert_eq!(r.to_flat_vec::<f64>()?, x.to_flat_vec::<f64>()?);

    assert!(matches!(x.reshape(&[4]), Err(Error::InvalidShape { .. })));
    Ok(())
}

#[test]
fn transpose_forward() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let t = x.transpose()?;
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.to_flat_vec::<f64>()?, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    Ok(())
}

#[test]
fn broadcast_to_forward() -> Result<()> {
    let x = setup_tensor(vec![1.0, 2.0], &[2, 1])?;
    let b = x.broadcast_to(&[2, 3])?;
    assert_eq!(b.to_flat_vec::<f64>()?, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);

    assert!(matches!(x.broadcast_to(&[3, 3]), Err(Error::InvalidShape { .. })));
    Ok(())
}

#[test]
fn reshape_backward_restores_shape() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    let y = x.reshape(&[4])?.pow_scalar(2.0)?.sum_all()?;
    y.backward()?;

    let grad = x.grad()?.unwrap();
    assert_eq!(grad.shape(), &[2, 2]);
    assert_eq!(grad.to_flat_vec::<f64>()?, vec![2.0, 4.0, 6.0, 8.0]);
    Ok(())
}

#[test]
fn transpose_gradients() -> Result<()> {
    check_gradients(&[1.0, -2.0, 3.0, 0.5, 2.5, -1.5], &[2, 3], |x| {
        let w = setup_tensor(vec![0.5, 1.0, -1.0, 2.0, 0.25, -0.5], &[3, 2])?;
        x.transpose()?.mul(&w)?.sum_all()
    })
}

#[test]
fn broadcast_to_gradients() -> Result<()> {
    check_gradients(&[1.5, -0.5], &[2, 1], |x| {
        let w = setup_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
        x.broadcast_to(&[2, 3])?.mul(&w)?.sum_all()
    })
}
