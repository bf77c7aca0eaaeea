//! Element types that tensors can hold.

/// The element type of a [crate::tensor::Tensor].
///
/// Only floating point numbers are supported: every activation needs
/// `exp`/`tanh`, and parameter initialisation samples uniformly.
pub trait Dtype:
    'static
    + Copy
    + Clone
    + Default
    + Send
    + Sync
    + std::fmt::Debug
    + std::fmt::Display
    + PartialOrd
    + num_traits::Float
    + num_traits::FromPrimitive
    + num_traits::ToPrimitive
    + rand_distr::uniform::SampleUniform
    + SafeTensorsDtype
{
}

impl Dtype for f32 {}
impl Dtype for f64 {}

/// Conversion to and from the safetensors byte layout.
pub trait SafeTensorsDtype: Sized {
    const DTYPE: safetensors::Dtype;
    const NUM_BYTES: usize;

    fn to_le_bytes_vec(&self) -> Vec<u8>;

    /// `bytes` must be exactly [SafeTensorsDtype::NUM_BYTES] long.
    fn from_le_byte_slice(bytes: &[u8]) -> Option<Self>;
}

macro_rules! safetensors_dtype {
    ($Ty:ty, $Tag:ident) => {
        impl SafeTensorsDtype for $Ty {
            const DTYPE: safetensors::Dtype = safetensors::Dtype::$Tag;
            const NUM_BYTES: usize = std::mem::size_of::<$Ty>();

            fn to_le_bytes_vec(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn from_le_byte_slice(bytes: &[u8]) -> Option<Self> {
                bytes.try_into().ok().map(<$Ty>::from_le_bytes)
            }
        }
    };
}

safetensors_dtype!(f32, F32);
safetensors_dtype!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_bytes() {
        let x = 1.5f32;
        let bytes = x.to_le_bytes_vec();
        assert_eq!(bytes.len(), f32::NUM_BYTES);
        assert_eq!(f32::from_le_byte_slice(&bytes), Some(1.5));
        assert_eq!(f64::from_le_byte_slice(&bytes), None);
    }
}
