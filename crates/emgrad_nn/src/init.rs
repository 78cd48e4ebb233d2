use emgrad_core::{
    error::{Error, Result},
    scalar::Scalar,
};
use emgrad_tensor::Tensor;

/// Which fan the kaiming variants scale by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanMode {
    FanIn,
    FanOut,
}

/// Fan counts for a weight shape: 2-D is `(rows, cols)`, 3-D to 5-D treats
/// trailing dims as a kernel whose product multiplies the channel dims.
pub fn fan_in_and_fan_out(shape: &[usize]) -> Result<(usize, usize)> {
    match shape.len() {
        2 => Ok((shape[0], shape[1])),
        3..=5 => {
            let kernel_prod: usize = shape[2..].iter().product();
            Ok((shape[1] * kernel_prod, shape[0] * kernel_prod))
        }
        _ => Err(Error::InvalidShape {
            message: format!(
                "weight shape {:?} is not supported, must be 2-d to 5-d",
                shape
            ),
        }),
    }
}

fn fan_for(shape: &[usize], mode: FanMode) -> Result<usize> {
    let (fan_in, fan_out) = fan_in_and_fan_out(shape)?;
    Ok(match mode {
        FanMode::FanIn => fan_in,
        FanMode::FanOut => fan_out,
    })
}

pub fn uniform(shape: &[usize], low: f64, high: f64) -> Result<Tensor> {
    Tensor::uniform(shape, low, high)
}

pub fn normal(shape: &[usize], mean: f64, std: f64) -> Result<Tensor> {
    Tensor::randn(shape)?.mul_scalar(std)?.add_scalar(mean)
}

pub fn constant(shape: &[usize], value: impl Into<Scalar>) -> Result<Tensor> {
    Tensor::full(shape, value)
}

pub fn xavier_uniform(shape: &[usize], gain: f64) -> Result<Tensor> {
    let (fan_in, fan_out) = fan_in_and_fan_out(shape)?;
    let bound = gain * (6.0 / (fan_in + fan_out) as f64).sqrt();
    Tensor::uniform(shape, -bound, bound)
}

pub fn xavier_normal(shape: &[usize], gain: f64) -> Result<Tensor> {
    let (fan_in, fan_out) = fan_in_and_fan_out(shape)?;
    let std = gain * (2.0 / (fan_in + fan_out) as f64).sqrt();
    normal(shape, 0.0, std)
}

pub fn kaiming_uniform(shape: &[usize], mode: FanMode) -> Result<Tensor> {
    let fan = fan_for(shape, mode)?;
    let bound = (6.0 / fan as f64).sqrt();
    Tensor::uniform(shape, -bound, bound)
}

pub fn kaiming_normal(shape: &[usize], mode: FanMode) -> Result<Tensor> {
    let fan = fan_for(shape, mode)?;
    let std = (2.0 / fan as f64).sqrt();
    normal(shape, 0.0, std)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emgrad_tensor::random::seed;

    fn sample_stats(tensor: &Tensor) -> Result<(f64, f64)> {
        let values = tensor.to_flat_vec::<f64>()?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok((mean, var.sqrt()))
    }

    #[test]
    fn fan_counts() -> Result<()> {
        assert_eq!(fan_in_and_fan_out(&[3, 5])?, (3, 5));
        // conv-style: (out_ch, in_ch, k, k)
        assert_eq!(fan_in_and_fan_out(&[8, 4, 3, 3])?, (36, 72));
        assert!(matches!(
            fan_in_and_fan_out(&[7]),
            Err(Error::InvalidShape { .. })
        ));
        Ok(())
    }

    #[test]
    fn xavier_uniform_respects_bound() -> Result<()> {
        seed(11);
        let w = xavier_uniform(&[64, 64], 1.0)?;
        let bound = (6.0 / 128.0f64).sqrt();
        // allow for f32 storage rounding at the boundary
        for v in w.to_flat_vec::<f64>()? {
            assert!(v.abs() <= bound * (1.0 + 1e-5));
        }
        Ok(())
    }

    #[test]
    fn kaiming_normal_std_tracks_fan() -> Result<()> {
        seed(23);
        let w = kaiming_normal(&[128, 256], FanMode::FanIn)?;
        let expected = (2.0 / 128.0f64).sqrt();
        let (mean, std) = sample_stats(&w)?;
        assert!(mean.abs() < 0.01, "mean drifted: {}", mean);
        assert!(
            (std - expected).abs() < expected * 0.1,
            "std {} far from {}",
            std,
            expected
        );
        Ok(())
    }

    #[test]
    fn kaiming_fan_out_uses_columns() -> Result<()> {
        seed(29);
        let w = kaiming_normal(&[64, 256], FanMode::FanOut)?;
        let expected = (2.0 / 256.0f64).sqrt();
        let (_, std) = sample_stats(&w)?;
        assert!((std - expected).abs() < expected * 0.1);
        Ok(())
    }

    #[test]
    fn constant_fills() -> Result<()> {
        let w = constant(&[2, 2], 0.5)?;
        assert_eq!(w.to_flat_vec::<f64>()?, vec![0.5; 4]);
        Ok(())
    }

    #[test]
    fn init_tensors_are_trainable_leaves() -> Result<()> {
        seed(31);
        let mut w = kaiming_uniform(&[4, 4], FanMode::FanIn)?;
        w.with_grad()?;
        assert!(w.requires_grad());
        Ok(())
    }
}
