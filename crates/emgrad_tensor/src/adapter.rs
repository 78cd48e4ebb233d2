use emgrad_core::{
    array::Element,
    dtype::DType,
    error::{Error, Result},
};
use half::f16;

/// Host data that can seed a tensor: scalars, flat vectors and slices, and
/// nested vectors up to three dimensions.
pub trait TensorAdapter {
    type Elem: Element;

    fn to_shape(&self) -> Result<Vec<usize>>;

    fn to_flat_vec(self) -> Vec<Self::Elem>;

    fn dtype(&self) -> DType {
        Self::Elem::DTYPE
    }
}

fn ragged_row(index: usize, expected: usize, got: usize) -> Error {
    Error::InvalidShape {
        message: format!(
            "ragged nested input: row {} has {} elements, expected {}",
            index, got, expected
        ),
    }
}

macro_rules! impl_adapter {
    ($($t:ty),* $(,)?) => {
        $(
            impl TensorAdapter for $t {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    Ok(vec![])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    vec![self]
                }
            }

            impl TensorAdapter for Vec<$t> {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    Ok(vec![self.len()])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    self
                }
            }

            impl TensorAdapter for &[$t] {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    Ok(vec![self.len()])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    self.to_vec()
                }
            }

            impl<const N: usize> TensorAdapter for [$t; N] {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    Ok(vec![N])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    self.to_vec()
                }
            }

            impl TensorAdapter for Vec<Vec<$t>> {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    let cols = self.first().map_or(0, |row| row.len());
                    for (i, row) in self.iter().enumerate() {
                        if row.len() != cols {
                            return Err(ragged_row(i, cols, row.len()));
                        }
                    }
                    Ok(vec![self.len(), cols])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    self.into_iter().flatten().collect()
                }
            }

            impl TensorAdapter for Vec<Vec<Vec<$t>>> {
                type Elem = $t;

                fn to_shape(&self) -> Result<Vec<usize>> {
                    let mid = self.first().map_or(0, |plane| plane.len());
                    let inner = self
                        .first()
                        .and_then(|plane| plane.first())
                        .map_or(0, |row| row.len());
                    for (i, plane) in self.iter().enumerate() {
                        if plane.len() != mid {
                            return Err(ragged_row(i, mid, plane.len()));
                        }
                        for (j, row) in plane.iter().enumerate() {
                            if row.len() != inner {
                                return Err(ragged_row(j, inner, row.len()));
                            }
                        }
                    }
                    Ok(vec![self.len(), mid, inner])
                }

                fn to_flat_vec(self) -> Vec<$t> {
                    self.into_iter().flatten().flatten().collect()
                }
            }
        )*
    };
}

impl_adapter!(f16, f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rows_must_agree() {
        // total element count matches rows x first-row width, so only a
        // per-row check catches this
        let data = vec![
            vec![1.0f32, 2.0, 3.0],
            vec![4.0],
            vec![5.0, 6.0, 7.0, 8.0, 9.0],
        ];
        assert!(matches!(
            data.to_shape(),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn three_d_planes_must_agree() {
        let data = vec![
            vec![vec![1.0f64, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0]],
        ];
        assert!(matches!(
            data.to_shape(),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn flat_and_scalar_shapes() -> Result<()> {
        assert_eq!(3.5f32.to_shape()?, Vec::<usize>::new());
        assert_eq!(vec![1i64, 2, 3].to_shape()?, vec![3]);
        assert_eq!([1.0f32, 2.0].to_shape()?, vec![2]);
        Ok(())
    }
}
