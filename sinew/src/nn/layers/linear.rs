use crate::prelude::*;

use rand_distr::Uniform;

/// A linear transformation of the form `x * weight^T + bias`, where `weight` is a matrix, `x` is a vector or matrix,
/// and `bias` is a vector.
///
/// Example:
/// ```rust
/// # use sinew::prelude::*;
/// # let dev: Cpu = Default::default();
/// let model = dev.build_module::<f32>(LinearConfig::new(5, 2));
/// // single item forward
/// let y = model.forward(dev.zeros(&[5]));
/// assert_eq!(y.shape(), &[2]);
/// // batched forward
/// let y = model.forward(dev.zeros(&[10, 5]));
/// assert_eq!(y.shape(), &[10, 2]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearConfig {
    pub inp: usize,
    pub out: usize,
}

impl LinearConfig {
    pub fn new(inp: usize, out: usize) -> Self {
        Self { inp, out }
    }
}

impl<E: Dtype> BuildOnDevice<E> for LinearConfig {
    type Built = Linear<E>;
    fn try_build_on_device(&self, device: &Cpu) -> Result<Self::Built, Error> {
        Ok(Linear {
            weight: device.try_full(&[self.out, self.inp], E::zero())?,
            bias: device.try_full(&[self.out], E::zero())?,
        })
    }
}

/// See [LinearConfig].
#[derive(Clone, Debug)]
pub struct Linear<E: Dtype> {
    /// Shape `[out, inp]`.
    pub weight: Tensor<E>,
    /// Shape `[out]`.
    pub bias: Tensor<E>,
}

impl<E: Dtype> Linear<E> {
    /// The last dimension of `weight`, or `0` if it has none.
    pub fn in_features(&self) -> usize {
        self.weight.shape().last().copied().unwrap_or(0)
    }

    /// The first dimension of `weight` when it is 2d, otherwise `0`.
    pub fn out_features(&self) -> usize {
        match self.weight.shape() {
            [out, _] => *out,
            _ => 0,
        }
    }
}

impl<E: Dtype> ResetParams for Linear<E> {
    fn try_reset_params(&mut self) -> Result<(), Error> {
        let i = self.in_features().max(1);
        let b = E::from_f64(1.0 / (i as f64).sqrt()).unwrap_or_else(E::one);
        tracing::trace!(
            in_features = self.in_features(),
            out_features = self.out_features(),
            "resetting linear parameters"
        );
        self.weight.try_fill_with_distr(Uniform::new(-b, b))?;
        self.bias.try_fill_with_distr(Uniform::new(-b, b))
    }
}

impl<E: Dtype> Module<Tensor<E>> for Linear<E> {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        let weight = self.weight.try_transpose()?;
        x.try_matmul(&weight)?.try_add_broadcast(&self.bias)
    }
}

impl<E: Dtype> PrettyPrint for Linear<E> {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        write!(
            f,
            "Linear(in_features={}, out_features={})",
            self.in_features(),
            self.out_features()
        )
    }
}

impl<E: Dtype> Serializable for Linear<E> {}

impl<E: Dtype> SaveSafeTensors for Linear<E> {
    fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
        self.weight
            .write_safetensors(&join_key(location, "weight"), tensors);
        self.bias.write_safetensors(&join_key(location, "bias"), tensors);
    }
}

impl<E: Dtype> LoadSafeTensors for Linear<E> {
    fn read_safetensors(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        self.weight
            .read_safetensors(&join_key(location, "weight"), tensors)?;
        self.bias.read_safetensors(&join_key(location, "bias"), tensors)
    }
}
