use super::{Error, Tensor};
use crate::dtypes::{Dtype, SafeTensorsDtype};
use safetensors::tensor::SafeTensors;

/// A tensor waiting to be written: `(key, dtype, shape, little endian bytes)`.
pub type SafeTensorEntry = (String, safetensors::Dtype, Vec<usize>, Vec<u8>);

impl<E: Dtype> Tensor<E> {
    pub(crate) fn to_safetensor_entry(&self, key: &str) -> SafeTensorEntry {
        (
            key.to_string(),
            E::DTYPE,
            self.shape.clone(),
            self.data.iter().flat_map(|e| e.to_le_bytes_vec()).collect(),
        )
    }

    /// Loads data from the [SafeTensors] entry with the given `key`.
    pub fn load_safetensor(&mut self, tensors: &SafeTensors, key: &str) -> Result<(), Error> {
        let view = tensors.tensor(key)?;
        if view.dtype() != E::DTYPE {
            return Err(Error::WrongDtype {
                key: key.to_string(),
                expected: E::DTYPE,
                found: view.dtype(),
            });
        }
        if view.shape() != self.shape.as_slice() {
            return Err(Error::shape_mismatch(
                "load_safetensor",
                &self.shape,
                view.shape(),
            ));
        }
        let data = view
            .data()
            .chunks_exact(E::NUM_BYTES)
            .map(E::from_le_byte_slice)
            .collect::<Option<Vec<E>>>()
            .ok_or_else(|| Error::WrongDtype {
                key: key.to_string(),
                expected: E::DTYPE,
                found: view.dtype(),
            })?;
        self.try_copy_from(&data)
    }
}
