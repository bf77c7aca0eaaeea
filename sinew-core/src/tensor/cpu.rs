use super::{unique_id, Error, Tensor};
use crate::dtypes::Dtype;

use rand::{distributions::Distribution, rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex};

/// A device that allocates tensors on the heap.
///
/// Clones share the same rng, so parameter initialisation is reproducible for
/// a given seed regardless of how many handles to the device exist.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub(crate) rng: Arc<Mutex<StdRng>>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::seed_from_u64(0)
    }
}

impl Cpu {
    /// Constructs with the rng seeded by `seed`.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub(crate) fn sample_vec<E, D: Distribution<E>>(&self, numel: usize, distr: D) -> Vec<E> {
        // a poisoned rng is still a valid rng
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        distr.sample_iter(&mut *rng).take(numel).collect()
    }

    /// Creates a tensor of `shape` holding `data` in row-major order.
    pub fn try_tensor_from_vec<E: Dtype>(
        &self,
        data: Vec<E>,
        shape: &[usize],
    ) -> Result<Tensor<E>, Error> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::WrongNumElements {
                expected,
                found: data.len(),
            });
        }
        Ok(Tensor {
            id: unique_id(),
            data: Arc::new(data),
            shape: shape.to_vec(),
            device: self.clone(),
        })
    }

    pub fn tensor_from_vec<E: Dtype>(&self, data: Vec<E>, shape: &[usize]) -> Tensor<E> {
        self.try_tensor_from_vec(data, shape).unwrap()
    }

    /// Creates a tensor from a scalar or a (nested) rust array.
    pub fn tensor<E: Dtype, Src: TensorFrom<E>>(&self, src: Src) -> Tensor<E> {
        let (data, shape) = src.into_data_and_shape();
        self.tensor_from_vec(data, &shape)
    }

    pub fn try_full<E: Dtype>(&self, shape: &[usize], value: E) -> Result<Tensor<E>, Error> {
        let numel = shape.iter().product();
        self.try_tensor_from_vec(vec![value; numel], shape)
    }

    pub fn zeros<E: Dtype>(&self, shape: &[usize]) -> Tensor<E> {
        self.try_full(shape, E::zero()).unwrap()
    }

    pub fn ones<E: Dtype>(&self, shape: &[usize]) -> Tensor<E> {
        self.try_full(shape, E::one()).unwrap()
    }

    /// Samples every element from `Uniform(low, high)`.
    pub fn sample_uniform<E: Dtype>(&self, shape: &[usize], low: E, high: E) -> Tensor<E> {
        self.try_sample_uniform(shape, low, high).unwrap()
    }

    /// Fails with [Error::InvalidRange] unless `low < high` and both bounds
    /// and their difference are finite.
    pub fn try_sample_uniform<E: Dtype>(
        &self,
        shape: &[usize],
        low: E,
        high: E,
    ) -> Result<Tensor<E>, Error> {
        if !(low < high && low.is_finite() && high.is_finite() && (high - low).is_finite()) {
            return Err(Error::InvalidRange {
                low: low.to_f64().unwrap_or(f64::NAN),
                high: high.to_f64().unwrap_or(f64::NAN),
            });
        }
        let numel = shape.iter().product();
        let data = self.sample_vec(numel, rand_distr::Uniform::new(low, high));
        self.try_tensor_from_vec(data, shape)
    }
}

/// Things that can be turned into a [Tensor] by [Cpu::tensor].
pub trait TensorFrom<E> {
    fn into_data_and_shape(self) -> (Vec<E>, Vec<usize>);
}

macro_rules! scalar_tensor_from {
    ($Ty:ty) => {
        impl TensorFrom<$Ty> for $Ty {
            fn into_data_and_shape(self) -> (Vec<$Ty>, Vec<usize>) {
                (vec![self], Vec::new())
            }
        }
    };
}

scalar_tensor_from!(f32);
scalar_tensor_from!(f64);

impl<E: Dtype, const M: usize> TensorFrom<E> for [E; M] {
    fn into_data_and_shape(self) -> (Vec<E>, Vec<usize>) {
        (self.to_vec(), vec![M])
    }
}

impl<E: Dtype, const M: usize, const N: usize> TensorFrom<E> for [[E; N]; M] {
    fn into_data_and_shape(self) -> (Vec<E>, Vec<usize>) {
        (self.iter().flatten().copied().collect(), vec![M, N])
    }
}

impl<E: Dtype, const M: usize, const N: usize, const O: usize> TensorFrom<E> for [[[E; O]; N]; M] {
    fn into_data_and_shape(self) -> (Vec<E>, Vec<usize>) {
        let data = self.iter().flatten().flatten().copied().collect();
        (data, vec![M, N, O])
    }
}

impl<E: Dtype> TensorFrom<E> for (Vec<E>, Vec<usize>) {
    fn into_data_and_shape(self) -> (Vec<E>, Vec<usize>) {
        self
    }
}
