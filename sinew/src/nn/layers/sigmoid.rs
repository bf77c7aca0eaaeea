use crate::prelude::*;

/// Calls [Tensor::try_sigmoid()].
#[derive(Default, Debug, Clone, Copy)]
pub struct Sigmoid;

stateless_module!(Sigmoid, "Sigmoid()");

impl<E: Dtype> Module<Tensor<E>> for Sigmoid {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        x.try_sigmoid()
    }
}
