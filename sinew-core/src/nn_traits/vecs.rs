use crate::{
    dtypes::Dtype,
    nn_traits::{join_key, pretty_print_children, read_member, write_member, PrettyPrint as _},
    tensor::{Cpu, Error, SafeTensorEntry},
};

impl<E: Dtype, T: crate::nn_traits::BuildOnDevice<E>> crate::nn_traits::BuildOnDevice<E> for Vec<T> {
    type Built = Vec<T::Built>;
    fn try_build_on_device(&self, device: &Cpu) -> Result<Self::Built, Error> {
        self.iter()
            .map(|m_i| m_i.try_build_on_device(device))
            .collect()
    }
}

impl<T: crate::nn_traits::ResetParams> crate::nn_traits::ResetParams for Vec<T> {
    fn try_reset_params(&mut self) -> Result<(), Error> {
        for m_i in self.iter_mut() {
            m_i.try_reset_params()?;
        }
        Ok(())
    }
}

impl<T: crate::nn_traits::PrettyPrint> crate::nn_traits::PrettyPrint for Vec<T> {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        pretty_print_children(
            f,
            "Sequential",
            self.iter().map(|m_i| m_i.try_pretty_string()),
        )
    }
}

impl<T: crate::nn_traits::Serializable> crate::nn_traits::Serializable for Vec<T> {}

impl<T: crate::nn_traits::SaveSafeTensors> crate::nn_traits::SaveSafeTensors for Vec<T> {
    fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
        for (i, t) in self.iter().enumerate() {
            write_member(t, &join_key(location, &i.to_string()), tensors);
        }
    }
}

impl<T: crate::nn_traits::LoadSafeTensors> crate::nn_traits::LoadSafeTensors for Vec<T> {
    fn read_safetensors(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        for (i, t) in self.iter_mut().enumerate() {
            read_member(t, &join_key(location, &i.to_string()), tensors)?;
        }
        Ok(())
    }
}

impl<Input, T: crate::nn_traits::Module<Input, Output = Input>> crate::nn_traits::Module<Input>
    for Vec<T>
{
    type Output = T::Output;

    fn try_forward(&self, mut x: Input) -> Result<Self::Output, Error> {
        for m_i in self.iter() {
            x = m_i.try_forward(x)?;
        }
        Ok(x)
    }

    fn try_forward_mut(&mut self, mut x: Input) -> Result<Self::Output, Error> {
        for m_i in self.iter_mut() {
            x = m_i.try_forward_mut(x)?;
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use crate::nn_traits::*;
    use crate::tests::*;

    #[derive(Clone, Debug)]
    struct Scale(TestDtype);

    impl Module<Tensor<TestDtype>> for Scale {
        type Output = Tensor<TestDtype>;
        fn try_forward(&self, x: Tensor<TestDtype>) -> Result<Self::Output, Error> {
            x.try_scalar_mul(self.0)
        }
    }

    impl PrettyPrint for Scale {
        fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
            write!(f, "Scale({})", self.0)
        }
    }

    #[test]
    fn test_vec_forward() {
        let dev: TestDevice = Default::default();
        let x: Tensor<TestDtype> = dev.tensor([1.0, -1.0]);
        let model = vec![Scale(2.0), Scale(3.0)];
        assert_close_to_literal!(model.forward(x.clone()), [6.0, -6.0]);

        let empty: Vec<Scale> = Vec::new();
        assert_eq!(empty.forward(x.clone()), x);
    }

    #[test]
    fn test_vec_pretty_print() {
        let model = vec![Scale(2.0), Scale(0.5)];
        assert_eq!(
            model.pretty_string(),
            "Sequential(\n  (0): Scale(2)\n  (1): Scale(0.5)\n)"
        );
    }

    #[derive(Clone, Debug)]
    struct Param(Tensor<TestDtype>);

    impl ResetParams for Param {
        fn try_reset_params(&mut self) -> Result<(), Error> {
            let shape = self.0.shape().to_vec();
            self.0 = self.0.device().ones(&shape);
            Ok(())
        }
    }

    #[derive(Clone, Debug)]
    struct ParamConfig(usize);

    impl BuildOnDevice<TestDtype> for ParamConfig {
        type Built = Param;
        fn try_build_on_device(&self, device: &Cpu) -> Result<Self::Built, Error> {
            Ok(Param(device.try_full(&[self.0], 0.0)?))
        }
    }

    #[derive(Clone, Debug, Default)]
    struct Opaque;

    impl Serializable for Opaque {
        fn is_serializable(&self) -> bool {
            false
        }
    }

    impl SaveSafeTensors for Opaque {
        fn write_safetensors(&self, _: &str, _: &mut Vec<SafeTensorEntry>) {
            panic!("non-serializable modules must be skipped");
        }
    }

    impl LoadSafeTensors for Opaque {
        fn read_safetensors(&mut self, _: &str, _: &safetensors::SafeTensors) -> Result<(), Error> {
            panic!("non-serializable modules must be skipped");
        }
    }

    #[test]
    fn test_vec_save_load() {
        let dev: TestDevice = Default::default();
        let saved: Vec<Tensor<TestDtype>> = vec![dev.tensor([1.0, 2.0]), dev.tensor([[3.0], [4.0]])];
        let bytes = saved.to_safetensors_bytes().unwrap();

        let tensors = safetensors::SafeTensors::deserialize(&bytes).unwrap();
        let mut names = tensors.names();
        names.sort();
        assert_eq!(names, ["0", "1"]);

        let mut loaded: Vec<Tensor<TestDtype>> = vec![dev.zeros(&[2]), dev.zeros(&[2, 1])];
        loaded.load_safetensors_from_bytes(&bytes).unwrap();
        assert_eq!(loaded, saved);

        let mut wrong_shape: Vec<Tensor<TestDtype>> = vec![dev.zeros(&[3]), dev.zeros(&[2, 1])];
        assert!(matches!(
            wrong_shape.load_safetensors_from_bytes(&bytes),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_vec_skips_non_serializable() {
        let model = vec![Opaque, Opaque];
        let bytes = model.to_safetensors_bytes().unwrap();
        let tensors = safetensors::SafeTensors::deserialize(&bytes).unwrap();
        assert!(tensors.names().is_empty());

        let mut loaded = vec![Opaque];
        loaded.load_safetensors_from_bytes(&bytes).unwrap();
    }

    #[test]
    fn test_vec_reset_reaches_every_member() {
        let dev: TestDevice = Default::default();
        let mut model = vec![Param(dev.zeros(&[2])), Param(dev.zeros(&[3]))];
        model.reset_params();
        assert_close_to_literal!(model[0].0, [1.0, 1.0]);
        assert_close_to_literal!(model[1].0, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_vec_build_module() {
        let dev: TestDevice = Default::default();
        let model = dev.build_module::<TestDtype>(vec![ParamConfig(1), ParamConfig(4)]);
        assert_eq!(model.len(), 2);
        assert_eq!(model[0].0.shape(), &[1]);
        assert_eq!(model[1].0.shape(), &[4]);
        assert_close_to_literal!(model[1].0, [1.0, 1.0, 1.0, 1.0]);

        let empty = dev.build_module::<TestDtype>(Vec::<ParamConfig>::new());
        assert!(empty.is_empty());
    }
}
