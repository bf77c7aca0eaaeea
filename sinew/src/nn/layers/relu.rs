use crate::prelude::*;

/// Calls [Tensor::try_relu()].
#[derive(Default, Debug, Clone, Copy)]
pub struct ReLU;

stateless_module!(ReLU, "ReLU()");

impl<E: Dtype> Module<Tensor<E>> for ReLU {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        x.try_relu()
    }
}
