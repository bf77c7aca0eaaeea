//! # sinew-core
//!
//! The tensor runtime and the module traits that `sinew` builds its neural
//! network modules on.
//!
//! # Tensors & Devices
//!
//! *See [tensor] and [tensor_ops] for more information.*
//!
//! A [`tensor::Tensor`] is a contiguous nd-array of a float [`dtypes::Dtype`]
//! whose shape is known at runtime. Tensors are allocated by the
//! [`tensor::Cpu`] device, which also owns the rng used for initialisation:
//!
//! ```rust
//! # use sinew_core::prelude::*;
//! let dev: Cpu = Cpu::seed_from_u64(0);
//! let x: Tensor<f32> = dev.tensor([[-1.0, 2.0], [3.0, -4.0]]);
//! let y = x.relu();
//! assert_eq!(y.as_vec(), [0.0, 2.0, 3.0, 0.0]);
//! ```
//!
//! # Modules
//!
//! *See [nn_traits] for more information.*
//!
//! Anything that implements [`nn_traits::Module`] can be chained with other
//! modules, either statically in a tuple or dynamically in a [Vec]:
//!
//! ```rust
//! # use sinew_core::prelude::*;
//! #[derive(Clone, Debug)]
//! struct Double;
//!
//! impl Module<Tensor<f32>> for Double {
//!     type Output = Tensor<f32>;
//!     fn try_forward(&self, x: Tensor<f32>) -> Result<Tensor<f32>, Error> {
//!         x.try_scalar_mul(2.0)
//!     }
//! }
//!
//! let dev: Cpu = Default::default();
//! let y = (Double, Double).forward(dev.tensor([1.0f32]));
//! assert_eq!(y.as_vec(), [4.0]);
//! ```

pub mod dtypes;
pub mod nn_traits;
pub mod tensor;
pub mod tensor_ops;

/// Contains subset of all public exports.
pub mod prelude {
    pub use crate::dtypes::Dtype;
    pub use crate::nn_traits::*;
    pub use crate::tensor::*;
}
