use crate::prelude::*;

use std::sync::Arc;

type BoxedFn<E> = Arc<dyn Fn(Tensor<E>) -> Result<Tensor<E>, Error> + Send + Sync>;

/// Wraps a function in a [Module].
///
/// `Functional` allows wrapping an arbitrary function or closure so that it can
/// be used anywhere a module can, most usefully as a stage of a sequential
/// model:
///
/// ```rust
/// # use sinew::prelude::*;
/// let dev: Cpu = Default::default();
/// let model = dev.build_module::<f32>((
///     LinearConfig::new(3, 4),
///     Functional::new(|x: Tensor<f32>| x.try_relu()),
///     LinearConfig::new(4, 2),
///     Functional::bind(|x: Tensor<f32>, alpha: &f32| x.try_elu(*alpha), 1.0),
/// ));
/// let y = model.forward(dev.tensor([[1.0, -2.0, 3.0]]));
/// assert_eq!(y.shape(), &[1, 2]);
/// ```
///
/// A `Functional` only ever receives a single tensor. Further arguments of the
/// wrapped function have to be bound *at construction time* with
/// [Functional::bind]. For example, to wrap [Tensor::try_leaky_relu] with a
/// slope of `0.5`:
///
/// ```rust
/// # use sinew::prelude::*;
/// let leaky = Functional::bind(|x: Tensor<f32>, slope: &f32| x.try_leaky_relu(*slope), 0.5);
/// # let dev: Cpu = Default::default();
/// # assert_eq!(leaky.forward(dev.tensor([-1.0])).as_vec(), [-0.5]);
/// ```
///
/// The value `0.5` is evaluated once, stored inside the `Functional`, and lent
/// to the function on every call.
///
/// A `Functional` has no parameters: resetting it does nothing, and it opts out
/// of serialization since a closure cannot be written to disk. Containers
/// holding one save & load all of their other members.
#[derive(Clone)]
pub struct Functional<E: Dtype> {
    function: BoxedFn<E>,
}

impl<E: Dtype> Functional<E> {
    /// Wraps a fallible function. Errors it returns are passed through
    /// [Module::try_forward] unchanged.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(Tensor<E>) -> Result<Tensor<E>, Error> + Send + Sync + 'static,
    {
        tracing::trace!(dtype = std::any::type_name::<E>(), "wrapping function");
        Self {
            function: Arc::new(function),
        }
    }

    /// Wraps a function that cannot fail.
    pub fn from_fn<F>(function: F) -> Self
    where
        F: Fn(Tensor<E>) -> Tensor<E> + Send + Sync + 'static,
    {
        Self::new(move |x| Ok(function(x)))
    }

    /// Wraps `function`, binding `args` as its second argument. Use a tuple
    /// to bind several arguments.
    ///
    /// `args` is moved into the module here and never re-evaluated.
    pub fn bind<A, F>(function: F, args: A) -> Self
    where
        A: Send + Sync + 'static,
        F: Fn(Tensor<E>, &A) -> Result<Tensor<E>, Error> + Send + Sync + 'static,
    {
        Self::new(move |x| function(x, &args))
    }

    /// Same as [Module::try_forward].
    pub fn call(&self, input: Tensor<E>) -> Result<Tensor<E>, Error> {
        self.try_forward(input)
    }
}

impl<E: Dtype> Module<Tensor<E>> for Functional<E> {
    type Output = Tensor<E>;

    /// Forwards `x` to the wrapped (bound) function.
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        (self.function)(x)
    }
}

impl<E: Dtype> ResetParams for Functional<E> {
    fn try_reset_params(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<E: Dtype> PrettyPrint for Functional<E> {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        f.write_str("Functional()")
    }
}

impl<E: Dtype> std::fmt::Display for Functional<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pretty_print(f)
    }
}

impl<E: Dtype> std::fmt::Debug for Functional<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pretty_print(f)
    }
}

impl<E: Dtype> Serializable for Functional<E> {
    fn is_serializable(&self) -> bool {
        false
    }
}

impl<E: Dtype> SaveSafeTensors for Functional<E> {
    fn write_safetensors(&self, _location: &str, _tensors: &mut Vec<SafeTensorEntry>) {}
}

impl<E: Dtype> LoadSafeTensors for Functional<E> {
    fn read_safetensors(
        &mut self,
        _location: &str,
        _tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        Ok(())
    }
}

impl<E: Dtype> BuildOnDevice<E> for Functional<E> {
    type Built = Self;
    fn try_build_on_device(&self, _device: &Cpu) -> Result<Self::Built, Error> {
        Ok(self.clone())
    }
}
