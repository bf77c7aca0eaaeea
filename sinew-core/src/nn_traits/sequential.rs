use crate::{
    dtypes::Dtype,
    nn_traits::{
        join_key, pretty_print_children, LoadSafeTensors, Module, PrettyPrint, ResetParams,
        SaveSafeTensors, Serializable,
    },
    tensor::{Error, SafeTensorEntry, Tensor},
};

/// An object safe view of a module that maps a [Tensor] to a [Tensor].
///
/// Implemented for every module with the full capability set, so modules of
/// different types can be stored side by side in a [Sequential].
pub trait DynModule<E: Dtype>: Send + Sync {
    fn try_forward_dyn(&self, x: Tensor<E>) -> Result<Tensor<E>, Error>;
    fn try_reset_params_dyn(&mut self) -> Result<(), Error>;
    fn pretty_print_dyn(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result;
    fn is_serializable_dyn(&self) -> bool;
    fn write_safetensors_dyn(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>);
    fn read_safetensors_dyn(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error>;
    fn clone_box(&self) -> Box<dyn DynModule<E>>;
}

impl<E, M> DynModule<E> for M
where
    E: Dtype,
    M: Module<Tensor<E>, Output = Tensor<E>>
        + ResetParams
        + PrettyPrint
        + SaveSafeTensors
        + LoadSafeTensors
        + Clone
        + Send
        + Sync
        + 'static,
{
    fn try_forward_dyn(&self, x: Tensor<E>) -> Result<Tensor<E>, Error> {
        self.try_forward(x)
    }

    fn try_reset_params_dyn(&mut self) -> Result<(), Error> {
        self.try_reset_params()
    }

    fn pretty_print_dyn(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        self.pretty_print(f)
    }

    fn is_serializable_dyn(&self) -> bool {
        self.is_serializable()
    }

    fn write_safetensors_dyn(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
        self.write_safetensors(location, tensors)
    }

    fn read_safetensors_dyn(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        self.read_safetensors(location, tensors)
    }

    fn clone_box(&self) -> Box<dyn DynModule<E>> {
        Box::new(self.clone())
    }
}

/// A chain of modules whose types are erased, so the chain can be assembled
/// at runtime.
///
/// ```rust
/// # use sinew_core::prelude::*;
/// #[derive(Clone, Debug)]
/// struct Double;
/// # impl Module<Tensor<f32>> for Double {
/// #     type Output = Tensor<f32>;
/// #     fn try_forward(&self, x: Tensor<f32>) -> Result<Tensor<f32>, Error> { x.try_scalar_mul(2.0) }
/// # }
/// # impl ResetParams for Double { fn try_reset_params(&mut self) -> Result<(), Error> { Ok(()) } }
/// # impl PrettyPrint for Double {
/// #     fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result { f.write_str("Double()") }
/// # }
/// # impl Serializable for Double {}
/// # impl SaveSafeTensors for Double { fn write_safetensors(&self, _: &str, _: &mut Vec<SafeTensorEntry>) {} }
/// # impl LoadSafeTensors for Double {
/// #     fn read_safetensors(&mut self, _: &str, _: &safetensors::SafeTensors) -> Result<(), Error> { Ok(()) }
/// # }
/// let mut model = Sequential::<f32>::new().add(Double);
/// model.push(Double);
/// assert_eq!(model.len(), 2);
///
/// let dev: Cpu = Default::default();
/// assert_eq!(model.forward(dev.tensor([1.0])).as_vec(), [4.0]);
/// ```
pub struct Sequential<E: Dtype> {
    modules: Vec<Box<dyn DynModule<E>>>,
}

impl<E: Dtype> Sequential<E> {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Appends `module` and returns the chain.
    #[must_use]
    pub fn add<M: DynModule<E> + 'static>(mut self, module: M) -> Self {
        self.push(module);
        self
    }

    pub fn push<M: DynModule<E> + 'static>(&mut self, module: M) {
        self.modules.push(Box::new(module));
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<E: Dtype> Default for Sequential<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Dtype> Clone for Sequential<E> {
    fn clone(&self) -> Self {
        Self {
            modules: self.modules.iter().map(|m| m.clone_box()).collect(),
        }
    }
}

impl<E: Dtype> std::fmt::Debug for Sequential<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pretty_print(f)
    }
}

impl<E: Dtype> Module<Tensor<E>> for Sequential<E> {
    type Output = Tensor<E>;

    /// Calls forward on each module in order, stopping at the first error.
    fn try_forward(&self, mut x: Tensor<E>) -> Result<Self::Output, Error> {
        for m in self.modules.iter() {
            x = m.try_forward_dyn(x)?;
        }
        Ok(x)
    }
}

impl<E: Dtype> ResetParams for Sequential<E> {
    fn try_reset_params(&mut self) -> Result<(), Error> {
        for m in self.modules.iter_mut() {
            m.try_reset_params_dyn()?;
        }
        Ok(())
    }
}

impl<E: Dtype> PrettyPrint for Sequential<E> {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        pretty_print_children(
            f,
            "Sequential",
            self.modules.iter().map(|m| {
                let mut s = String::new();
                m.pretty_print_dyn(&mut s).map(|_| s)
            }),
        )
    }
}

impl<E: Dtype> Serializable for Sequential<E> {}

impl<E: Dtype> SaveSafeTensors for Sequential<E> {
    fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
        for (i, m) in self.modules.iter().enumerate() {
            let key = join_key(location, &i.to_string());
            if m.is_serializable_dyn() {
                m.write_safetensors_dyn(&key, tensors);
            } else {
                tracing::debug!(key, "skipping non-serializable module");
            }
        }
    }
}

impl<E: Dtype> LoadSafeTensors for Sequential<E> {
    fn read_safetensors(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        for (i, m) in self.modules.iter_mut().enumerate() {
            let key = join_key(location, &i.to_string());
            if m.is_serializable_dyn() {
                m.read_safetensors_dyn(&key, tensors)?;
            } else {
                tracing::debug!(key, "skipping non-serializable module");
            }
        }
        Ok(())
    }
}
