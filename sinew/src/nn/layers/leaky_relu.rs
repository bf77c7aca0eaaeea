use crate::prelude::*;

/// ReLU but maintains a small gradient if the input values are negative.
#[derive(Debug, Clone, Copy)]
pub struct LeakyReLU(pub f64);

impl Default for LeakyReLU {
    fn default() -> Self {
        Self(0.05)
    }
}

stateless_module!(LeakyReLU);

impl PrettyPrint for LeakyReLU {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
        write!(f, "LeakyReLU(negative_slope={})", self.0)
    }
}

impl<E: Dtype> Module<Tensor<E>> for LeakyReLU {
    type Output = Tensor<E>;
    fn try_forward(&self, x: Tensor<E>) -> Result<Self::Output, Error> {
        let slope = E::from_f64(self.0).unwrap_or_else(E::nan);
        x.try_leaky_relu(slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn test_leaky_relu() {
        let dev: TestDevice = Default::default();
        let x: Tensor<TestDtype> = dev.tensor([-2.0, -1.0, 0.0, 1.0]);
        assert_close_to_literal!(LeakyReLU::default().forward(x.clone()), [-0.1, -0.05, 0.0, 1.0]);
        assert_close_to_literal!(LeakyReLU(0.5).forward(x), [-1.0, -0.5, 0.0, 1.0]);
        assert_eq!(LeakyReLU(0.5).pretty_string(), "LeakyReLU(negative_slope=0.5)");
    }
}
