use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Layout {
    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.shape.get(dim).copied()
    }
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn view(&mut self, new_shape: &[usize]) -> Result<()> {
        let old_size = self.size();
        let new_size = new_shape.iter().product();

        if old_size != new_size {
            return Err(Error::InvalidShape {
                message: format!("Cannot reshape layout of size {} to size {}", old_size, new_size),
            });
        }

        self.shape = new_shape.to_vec();
        self.strides = compute_strides(new_shape);

        Ok(())
    }
}

pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }

    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

pub fn pad_shape(shape: &[usize], target_rank: usize) -> Vec<usize> {
    let mut padded = vec![1; target_rank - shape.len()];
    padded.extend(shape);
    padded
}

/// Standard N-d broadcast of two shapes: align from the trailing dimension,
/// size-1 dimensions stretch.
pub fn broadcast_shape(lhs_shape: &[usize], rhs_shape: &[usize]) -> Result<Vec<usize>> {
    if lhs_shape.is_empty() {
        return Ok(rhs_shape.to_vec());
    }
    if rhs_shape.is_empty() {
        return Ok(lhs_shape.to_vec());
    }

    let max_rank = lhs_shape.len().max(rhs_shape.len());
    let padded_lhs = pad_shape(lhs_shape, max_rank);
    let padded_rhs = pad_shape(rhs_shape, max_rank);

    let mut broadcasted = Vec::with_capacity(max_rank);
    for (i, (&dim1, &dim2)) in padded_lhs.iter().zip(padded_rhs.iter()).enumerate() {
        if dim1 != 1 && dim2 != 1 && dim1 != dim2 {
            return Err(Error::InvalidShape {
                message: format!(
                    "Cannot broadcast shapes {:?} and {:?} at dimension {}",
                    lhs_shape, rhs_shape, i
                ),
            });
        }
        broadcasted.push(dim1.max(dim2));
    }

    Ok(broadcasted)
}

/// Strides of `shape` as seen from `target`, with stride 0 on stretched axes.
/// `shape` must broadcast to `target`.
pub fn broadcast_strides(shape: &[usize], target: &[usize]) -> Vec<usize> {
    let padded = pad_shape(shape, target.len());
    let natural = compute_strides(&padded);

    padded
        .iter()
        .zip(target.iter())
        .zip(natural.iter())
        .map(|((&dim, &t_dim), &stride)| if dim == 1 && t_dim != 1 { 0 } else { stride })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_row_major() {
        assert_eq!(compute_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[]), Vec::<usize>::new());
    }

    #[test]
    fn broadcast_stretches_ones() {
        assert_eq!(broadcast_shape(&[3, 1], &[1, 4]).unwrap(), vec![3, 4]);
        assert_eq!(broadcast_shape(&[5], &[2, 5]).unwrap(), vec![2, 5]);
        assert!(broadcast_shape(&[2, 3], &[4, 3]).is_err());
    }

    #[test]
    fn broadcast_strides_zero_stretched() {
        assert_eq!(broadcast_strides(&[3, 1], &[3, 4]), vec![1, 0]);
        assert_eq!(broadcast_strides(&[5], &[2, 5]), vec![0, 1]);
    }
}
