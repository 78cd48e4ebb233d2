pub mod ops;

use crate::{array::Array, error::Result};

pub type BinaryFn = fn(&mut Array, &Array, &Array, usize, usize, Option<&[usize]>) -> Result<()>;
pub type UnaryFn = fn(&mut Array, &Array, usize) -> Result<()>;
