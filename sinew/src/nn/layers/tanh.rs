use crate::prelude::*;

/// Calls [Tensor::try_tanh()].
#[derive(Default, Debug, Clone, Copy)]
pub struct Tanh;

stateless_module!(Tanh, "Tanh()");

impl<E: Dtype> Module<Tensor<E>> for Tanh {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        x.try_tanh()
    }
}
