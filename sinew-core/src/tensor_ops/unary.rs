use crate::{
    dtypes::Dtype,
    tensor::{Error, Tensor},
};

impl<E: Dtype> Tensor<E> {
    /// Applies `f` to every element, producing a new tensor of the same shape.
    pub fn try_map<F: Fn(E) -> E>(&self, f: F) -> Result<Self, Error> {
        let data = self.data.iter().map(|&x| f(x)).collect();
        Ok(self.with_data(data, self.shape.clone()))
    }

    /// [Rectified Linear Unit (ReLU)](https://en.wikipedia.org/wiki/Rectifier_(neural_networks)). `max(0, t)`
    ///
    /// ```rust
    /// # use sinew_core::prelude::*;
    /// # let dev: Cpu = Default::default();
    /// let t = dev.tensor([-1.0f32, 0.0, 1.0, 2.0]);
    /// assert_eq!(t.relu().as_vec(), [0.0, 0.0, 1.0, 2.0]);
    /// ```
    pub fn relu(&self) -> Self {
        self.try_relu().unwrap()
    }

    pub fn try_relu(&self) -> Result<Self, Error> {
        self.try_map(|x| if x > E::zero() { x } else { E::zero() })
    }

    /// `max(0, t) + slope * min(0, t)`
    ///
    /// ```rust
    /// # use sinew_core::prelude::*;
    /// # let dev: Cpu = Default::default();
    /// let t = dev.tensor([-1.0f32, 0.0, 1.0, 2.0]);
    /// assert_eq!(t.leaky_relu(0.05).as_vec(), [-0.05, 0.0, 1.0, 2.0]);
    /// ```
    pub fn leaky_relu(&self, slope: E) -> Self {
        self.try_leaky_relu(slope).unwrap()
    }

    pub fn try_leaky_relu(&self, slope: E) -> Result<Self, Error> {
        self.try_map(|x| if x < E::zero() { x * slope } else { x })
    }

    /// [Exponential Linear Unit](https://pytorch.org/docs/stable/generated/torch.nn.ELU.html).
    /// `t` if `t > 0`, otherwise `alpha * (exp(t) - 1)`.
    pub fn elu(&self, alpha: E) -> Self {
        self.try_elu(alpha).unwrap()
    }

    pub fn try_elu(&self, alpha: E) -> Result<Self, Error> {
        self.try_map(|x| if x > E::zero() { x } else { alpha * x.exp_m1() })
    }

    /// `1 / (1 + exp(-t))`
    pub fn sigmoid(&self) -> Self {
        self.try_sigmoid().unwrap()
    }

    pub fn try_sigmoid(&self) -> Result<Self, Error> {
        self.try_map(|x| E::one() / (E::one() + (-x).exp()))
    }

    pub fn tanh(&self) -> Self {
        self.try_tanh().unwrap()
    }

    pub fn try_tanh(&self) -> Result<Self, Error> {
        self.try_map(|x| x.tanh())
    }

    /// [Gaussian Linear Unit (GeLU)](https://paperswithcode.com/method/gelu), computed
    /// with the error function rather than the tanh approximation.
    /// `0.5 * t * (1 + erf(t / sqrt(2)))`
    pub fn accurate_gelu(&self) -> Self {
        self.try_accurate_gelu().unwrap()
    }

    pub fn try_accurate_gelu(&self) -> Result<Self, Error> {
        self.try_map(|x| {
            let x64 = x.to_f64().unwrap_or(f64::NAN);
            let y = 0.5 * x64 * (1.0 + libm::erf(x64 / std::f64::consts::SQRT_2));
            E::from_f64(y).unwrap_or_else(E::nan)
        })
    }

    pub fn exp(&self) -> Self {
        self.try_exp().unwrap()
    }

    pub fn try_exp(&self) -> Result<Self, Error> {
        self.try_map(|x| x.exp())
    }

    pub fn square(&self) -> Self {
        self.try_square().unwrap()
    }

    pub fn try_square(&self) -> Result<Self, Error> {
        self.try_map(|x| x * x)
    }

    pub fn negate(&self) -> Self {
        self.try_negate().unwrap()
    }

    pub fn try_negate(&self) -> Result<Self, Error> {
        self.try_map(|x| -x)
    }

    /// Clamps every element into `[min, max]`.
    pub fn clamp(&self, min: E, max: E) -> Self {
        self.try_clamp(min, max).unwrap()
    }

    pub fn try_clamp(&self, min: E, max: E) -> Result<Self, Error> {
        self.try_map(|x| x.max(min).min(max))
    }

    pub fn scalar_add(&self, rhs: E) -> Self {
        self.try_scalar_add(rhs).unwrap()
    }

    pub fn try_scalar_add(&self, rhs: E) -> Result<Self, Error> {
        self.try_map(|x| x + rhs)
    }

    pub fn scalar_mul(&self, rhs: E) -> Self {
        self.try_scalar_mul(rhs).unwrap()
    }

    pub fn try_scalar_mul(&self, rhs: E) -> Result<Self, Error> {
        self.try_map(|x| x * rhs)
    }
}
