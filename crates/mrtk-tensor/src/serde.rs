use crate::{shape::Shape, storage::TensorStorage, Tensor};

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for Tensor<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Tensor", 5)?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("dims", self.dims())?;
        state.serialize_field("strides", self.strides())?;
        state.serialize_field("resolution", self.resolution())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for Tensor<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            #[serde(default)]
            name: Option<String>,
            data: Vec<T>,
            dims: Vec<usize>,
            strides: Vec<usize>,
            #[serde(default)]
            resolution: Vec<f32>,
        }

        let TensorData {
            name,
            data,
            dims,
            strides,
            resolution,
        } = TensorData::deserialize(deserializer)?;

        let shape = Shape::with_resolution(&dims, &resolution).map_err(serde::de::Error::custom)?;
        if shape.strides() != strides.as_slice() {
            return Err(serde::de::Error::custom("Invalid strides"));
        }
        if shape.numel() != data.len() {
            return Err(serde::de::Error::custom("Invalid data length"));
        }

        let mut tensor = Tensor::from_parts(TensorStorage::from_vec(data), shape);
        if let Some(name) = name {
            tensor.set_name(name);
        }
        Ok(tensor)
    }
}
