//! # sinew
//!
//! Composable neural network modules on top of the tensors from `sinew-core`.
//!
//! Every module implements the same capability set ([`nn::Module`],
//! [`nn::ResetParams`], [`nn::PrettyPrint`] and the save & load traits), so
//! learned layers and plain functions can be mixed freely inside one model.
//!
//! # Building models
//!
//! *See [nn] for more information.*
//!
//! Tuples of modules run their members in order. Architecture descriptions
//! are turned into modules with [`nn::BuildModuleExt::build_module`]:
//!
//! ```rust
//! # use sinew::prelude::*;
//! let dev: Cpu = Cpu::seed_from_u64(0);
//! let model = dev.build_module::<f32>((LinearConfig::new(4, 8), ReLU, LinearConfig::new(8, 2)));
//! let y = model.forward(dev.zeros(&[3, 4]));
//! assert_eq!(y.shape(), &[3, 2]);
//! ```
//!
//! # Wrapping functions
//!
//! Any `Fn(Tensor<E>) -> Result<Tensor<E>, Error>` can be used as a module
//! through [`nn::Functional`]. Extra arguments are bound when the module is
//! created:
//!
//! ```rust
//! # use sinew::prelude::*;
//! let dev: Cpu = Default::default();
//! let model = (
//!     Functional::new(|x: Tensor<f32>| x.try_tanh()),
//!     Functional::bind(|x: Tensor<f32>, a: &f32| x.try_scalar_mul(*a), 2.0),
//! );
//! let y = model.forward(dev.tensor([0.0]));
//! assert_eq!(y.as_vec(), [0.0]);
//! ```
//!
//! # Runtime assembled models
//!
//! When the layout is only known at runtime, use [`nn::Sequential`]:
//!
//! ```rust
//! # use sinew::prelude::*;
//! let dev: Cpu = Default::default();
//! let mut model = Sequential::new()
//!     .add(dev.build_module::<f32>(LinearConfig::new(2, 2)))
//!     .add(Functional::new(|x: Tensor<f32>| x.try_sigmoid()));
//! model.push(Id);
//! println!("{}", model.pretty_string());
//! ```
//!
//! # Saving & loading
//!
//! Modules are saved in the [safetensors](https://github.com/huggingface/safetensors)
//! format. Members that are not serializable, like [`nn::Functional`], are
//! skipped by their containers:
//!
//! ```rust,no_run
//! # use sinew::prelude::*;
//! # let dev: Cpu = Default::default();
//! let model = dev.build_module::<f32>((
//!     LinearConfig::new(2, 2),
//!     Functional::new(|x: Tensor<f32>| x.try_relu()),
//! ));
//! // writes "0.weight" and "0.bias"
//! model.save_safetensors("model.safetensors").unwrap();
//! ```

pub mod nn;

pub use sinew_core::*;

pub use safetensors;

pub mod prelude {
    pub use crate::nn::*;
    pub use sinew_core::prelude::*;
}

#[cfg(test)]
pub(crate) mod tests {
    pub use crate::prelude::*;

    pub type TestDevice = super::tensor::Cpu;

    #[cfg(not(feature = "test-f64"))]
    pub type TestDtype = f32;

    #[cfg(feature = "test-f64")]
    pub type TestDtype = f64;

    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    pub trait Flatten {
        fn flatten_into(&self, out: &mut Vec<f64>);

        fn flat(&self) -> Vec<f64> {
            let mut out = Vec::new();
            self.flatten_into(&mut out);
            out
        }
    }

    impl Flatten for f64 {
        fn flatten_into(&self, out: &mut Vec<f64>) {
            out.push(*self);
        }
    }

    impl<T: Flatten, const M: usize> Flatten for [T; M] {
        fn flatten_into(&self, out: &mut Vec<f64>) {
            for t in self.iter() {
                t.flatten_into(out);
            }
        }
    }

    macro_rules! assert_close_to_literal {
        ($Lhs:expr, $Rhs:expr) => {
            assert_close_to_literal!($Lhs, $Rhs, $crate::tests::DEFAULT_TOLERANCE)
        };
        ($Lhs:expr, $Rhs:expr, $Tolerance:expr) => {{
            let lhs: Vec<f64> = $Lhs
                .as_vec()
                .iter()
                .map(|x| num_traits::ToPrimitive::to_f64(x).unwrap())
                .collect();
            let rhs: Vec<f64> = $crate::tests::Flatten::flat(&$Rhs);
            assert_eq!(lhs.len(), rhs.len(), "lhs and rhs have different numbers of elements");
            for (l, r) in lhs.iter().zip(rhs.iter()) {
                if (l - r).abs() > $Tolerance {
                    panic!("lhs != rhs | {l} != {r}\n\n{lhs:?}\n\n{rhs:?}");
                }
            }
        }};
    }
    pub(crate) use assert_close_to_literal;
}
