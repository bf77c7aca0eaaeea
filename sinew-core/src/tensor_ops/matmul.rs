#![allow(clippy::needless_range_loop)]

use crate::{
    dtypes::Dtype,
    tensor::{Error, Tensor},
};

/// `out[m, n] += lhs[m, k] * rhs[k, n]` for row-major slices.
fn gemm<E: Dtype>(m: usize, k: usize, n: usize, lhs: &[E], rhs: &[E], out: &mut [E]) {
    for i in 0..m {
        for p in 0..k {
            let l = lhs[i * k + p];
            for j in 0..n {
                out[i * n + j] = out[i * n + j] + l * rhs[p * n + j];
            }
        }
    }
}

impl<E: Dtype> Tensor<E> {
    /// Swaps the two axes of a 2d tensor.
    pub fn transpose(&self) -> Self {
        self.try_transpose().unwrap()
    }

    pub fn try_transpose(&self) -> Result<Self, Error> {
        let [m, n] = self.shape[..] else {
            return Err(Error::WrongRank {
                op: "transpose",
                expected: 2,
                found: self.shape.clone(),
            });
        };
        let mut data = Vec::with_capacity(m * n);
        for j in 0..n {
            for i in 0..m {
                data.push(self.data[i * n + j]);
            }
        }
        Ok(self.with_data(data, vec![n, m]))
    }

    /// Matrix multiplication. Supported shapes are:
    /// - `[k] x [k, n] -> [n]`
    /// - `[m, k] x [k, n] -> [m, n]`
    /// - `[b, m, k] x [k, n] -> [b, m, n]`
    ///
    /// ```rust
    /// # use sinew_core::prelude::*;
    /// # let dev: Cpu = Default::default();
    /// let a = dev.tensor([[1.0f32, 2.0], [3.0, 4.0]]);
    /// let b = dev.tensor([[1.0f32, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    /// let c = a.matmul(&b);
    /// assert_eq!(c.shape(), &[2, 3]);
    /// assert_eq!(c.as_vec(), [1.0, 2.0, 3.0, 3.0, 4.0, 7.0]);
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Self {
        self.try_matmul(rhs).unwrap()
    }

    pub fn try_matmul(&self, rhs: &Self) -> Result<Self, Error> {
        let mismatch = || Error::shape_mismatch("matmul", &self.shape, &rhs.shape);
        let [k2, n] = rhs.shape[..] else {
            return Err(mismatch());
        };
        let (batch, m, k, out_shape) = match self.shape[..] {
            [k] => (1, 1, k, vec![n]),
            [m, k] => (1, m, k, vec![m, n]),
            [b, m, k] => (b, m, k, vec![b, m, n]),
            _ => return Err(mismatch()),
        };
        if k != k2 {
            return Err(mismatch());
        }
        let mut out = vec![E::zero(); batch * m * n];
        for b in 0..batch {
            gemm(
                m,
                k,
                n,
                &self.data[b * m * k..(b + 1) * m * k],
                &rhs.data,
                &mut out[b * m * n..(b + 1) * m * n],
            );
        }
        Ok(self.with_data(out, out_shape))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::*;

    #[test]
    fn test_transpose() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.tensor([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.shape(), &[3, 2]);
        assert_close_to_literal!(t, [[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]);

        let v: Tensor<TestDtype> = dev.zeros(&[3]);
        assert!(matches!(
            v.try_transpose(),
            Err(Error::WrongRank { op: "transpose", expected: 2, ref found }) if found == &[3]
        ));
    }

    #[test]
    fn test_matmul_1d_2d_3d() {
        let dev: TestDevice = Default::default();
        let w: Tensor<TestDtype> = dev.tensor([[1.0, -1.0], [0.5, 2.0], [0.0, 1.0]]);

        let x1: Tensor<TestDtype> = dev.tensor([1.0, 2.0, 3.0]);
        assert_close_to_literal!(x1.matmul(&w), [2.0, 6.0]);

        let x2: Tensor<TestDtype> = dev.tensor([[1.0, 2.0, 3.0], [-1.0, 0.0, 1.0]]);
        assert_close_to_literal!(x2.matmul(&w), [[2.0, 6.0], [-1.0, 2.0]]);

        let x3: Tensor<TestDtype> = dev.tensor([[[1.0, 2.0, 3.0]], [[-1.0, 0.0, 1.0]]]);
        let y3 = x3.matmul(&w);
        assert_eq!(y3.shape(), &[2, 1, 2]);
        assert_close_to_literal!(y3, [[[2.0, 6.0]], [[-1.0, 2.0]]]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.zeros(&[2, 3]);
        let b: Tensor<TestDtype> = dev.zeros(&[2, 3]);
        assert!(matches!(
            a.try_matmul(&b),
            Err(Error::ShapeMismatch { op: "matmul", .. })
        ));
    }
}
