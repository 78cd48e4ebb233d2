use crate::Tensor;
use emgrad_core::{array::Array, device::Device, dtype::DType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
enum SerializedValues {
    Float(Vec<f64>),
    Int(Vec<i64>),
}

#[derive(Serialize, Deserialize)]
struct SerializedTensor {
    shape: Vec<usize>,
    dtype: DType,
    device: Device,
    requires_grad: bool,
    values: SerializedValues,
}

impl Serialize for Tensor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // f16/f32 widen to f64 losslessly, ints keep full precision
        let values = if self.dtype().is_int() {
            SerializedValues::Int(self.to_flat_vec::<i64>().map_err(serde::ser::Error::custom)?)
        } else {
            SerializedValues::Float(self.to_flat_vec::<f64>().map_err(serde::ser::Error::custom)?)
        };

        let serialized = SerializedTensor {
            shape: self.shape().to_vec(),
            dtype: self.dtype(),
            device: self.device(),
            requires_grad: self.requires_grad(),
            values,
        };
        serialized.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tensor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serialized = SerializedTensor::deserialize(deserializer)?;

        let array = match serialized.values {
            SerializedValues::Float(values) => {
                Array::from_vec_with_spec(values, &serialized.shape, serialized.device)
            }
            SerializedValues::Int(values) => {
                Array::from_vec_with_spec(values, &serialized.shape, serialized.device)
            }
        }
        .map_err(serde::de::Error::custom)?;
        let array = if array.dtype() == serialized.dtype {
            array
        } else {
            array.astype(serialized.dtype).map_err(serde::de::Error::custom)?
        };

        let mut tensor = Tensor::from_array(array);
        if serialized.requires_grad {
            tensor.with_grad().map_err(serde::de::Error::custom)?;
        }
        Ok(tensor)
    }
}
