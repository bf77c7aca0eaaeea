//! The [Tensor] struct, the [Cpu] device that allocates it, and the crate-wide [Error].
//!
//! A [Tensor] is a contiguous, row-major nd-array whose shape is only known
//! at runtime. The data is reference counted, so cloning a tensor is cheap
//! and operations always produce new tensors instead of writing in place.
//!
//! # Creating tensors
//!
//! ```rust
//! # use sinew_core::prelude::*;
//! let dev: Cpu = Default::default();
//! let a: Tensor<f32> = dev.tensor([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
//! assert_eq!(a.shape(), &[2, 3]);
//! let b: Tensor<f32> = dev.zeros(&[2, 3]);
//! let c = dev.try_tensor_from_vec(vec![1.0f32; 6], &[3, 2]).unwrap();
//! # let _ = (b, c);
//! ```

mod cpu;
mod error;
mod safetensors;

pub use cpu::{Cpu, TensorFrom};
pub use error::Error;
pub use self::safetensors::SafeTensorEntry;

use crate::dtypes::Dtype;
use rand::distributions::Distribution;
use std::sync::Arc;

/// An id used to tell tensors apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId(usize);

pub(crate) fn unique_id() -> UniqueId {
    static COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
    UniqueId(COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
}

impl std::ops::Deref for UniqueId {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A contiguous nd-array of `E` stored on the [Cpu].
#[derive(Clone)]
pub struct Tensor<E> {
    pub(crate) id: UniqueId,
    pub(crate) data: Arc<Vec<E>>,
    pub(crate) shape: Vec<usize>,
    pub(crate) device: Cpu,
}

impl<E: Dtype> std::fmt::Debug for Tensor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("data", &self.data)
            .finish()
    }
}

/// Two tensors are equal if they hold the same values in the same shape.
impl<E: Dtype> PartialEq for Tensor<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

impl<E> Tensor<E> {
    pub fn id(&self) -> UniqueId {
        self.id
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[E] {
        &self.data
    }

    pub fn device(&self) -> &Cpu {
        &self.device
    }
}

impl<E: Dtype> Tensor<E> {
    /// Copies the data out into a flat, row-major vec.
    pub fn as_vec(&self) -> Vec<E> {
        self.data.as_ref().clone()
    }

    /// Overwrites every element with a sample of `distr`, using the device's rng.
    pub fn try_fill_with_distr<D: Distribution<E>>(&mut self, distr: D) -> Result<(), Error> {
        let samples = self.device.sample_vec(self.numel(), distr);
        self.data = Arc::new(samples);
        self.id = unique_id();
        Ok(())
    }

    pub fn fill_with_distr<D: Distribution<E>>(&mut self, distr: D) {
        self.try_fill_with_distr(distr).unwrap()
    }

    /// Replaces the data with `src`, which must have exactly [Tensor::numel] elements.
    pub fn try_copy_from(&mut self, src: &[E]) -> Result<(), Error> {
        if src.len() != self.numel() {
            return Err(Error::WrongNumElements {
                expected: self.numel(),
                found: src.len(),
            });
        }
        Arc::make_mut(&mut self.data).copy_from_slice(src);
        Ok(())
    }

    pub(crate) fn with_data(&self, data: Vec<E>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Self {
            id: unique_id(),
            data: Arc::new(data),
            shape,
            device: self.device.clone(),
        }
    }
}
