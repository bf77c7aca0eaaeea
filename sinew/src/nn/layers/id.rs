use crate::prelude::*;

/// Forwards the input to the output.
#[derive(Default, Debug, Clone, Copy)]
pub struct Id;

stateless_module!(Id, "Id()");

impl<E: Dtype> Module<Tensor<E>> for Id {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn test_id_passes_input_through() {
        let dev: TestDevice = Default::default();
        let x: Tensor<TestDtype> = dev.tensor([1.0, -1.0]);
        let y = Id.forward(x.clone());
        assert_eq!(y.id(), x.id());
        assert_eq!((Id, Id, Id).forward(x.clone()), x);
    }
}
