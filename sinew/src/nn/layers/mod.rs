/// Implements everything but [Module](crate::nn::Module) for a module without
/// parameters: resetting does nothing, it builds into itself, and it saves &
/// loads no tensors.
macro_rules! stateless_module {
    ($Ty:ty) => {
        impl $crate::nn::ResetParams for $Ty {
            fn try_reset_params(&mut self) -> Result<(), $crate::tensor::Error> {
                Ok(())
            }
        }

        impl<E: $crate::dtypes::Dtype> $crate::nn::BuildOnDevice<E> for $Ty {
            type Built = Self;
            fn try_build_on_device(
                &self,
                _device: &$crate::tensor::Cpu,
            ) -> Result<Self::Built, $crate::tensor::Error> {
                Ok(self.clone())
            }
        }

        impl $crate::nn::Serializable for $Ty {}

        impl $crate::nn::SaveSafeTensors for $Ty {
            fn write_safetensors(&self, _: &str, _: &mut Vec<$crate::tensor::SafeTensorEntry>) {}
        }

        impl $crate::nn::LoadSafeTensors for $Ty {
            fn read_safetensors(
                &mut self,
                _: &str,
                _: &safetensors::SafeTensors,
            ) -> Result<(), $crate::tensor::Error> {
                Ok(())
            }
        }
    };
    ($Ty:ty, $label:literal) => {
        stateless_module!($Ty);

        impl $crate::nn::PrettyPrint for $Ty {
            fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
                f.write_str($label)
            }
        }
    };
}

mod functional;
mod id;
mod leaky_relu;
mod linear;
mod relu;
mod sigmoid;
mod tanh;

pub use functional::Functional;
pub use id::Id;
pub use leaky_relu::LeakyReLU;
pub use linear::{Linear, LinearConfig};
pub use relu::ReLU;
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;
