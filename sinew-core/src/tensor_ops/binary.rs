use crate::{
    dtypes::Dtype,
    tensor::{Error, Tensor},
};

impl<E: Dtype> Tensor<E> {
    /// Combines two tensors of exactly the same shape elementwise.
    pub fn try_zip_map<F: Fn(E, E) -> E>(
        &self,
        op: &'static str,
        rhs: &Self,
        f: F,
    ) -> Result<Self, Error> {
        if self.shape != rhs.shape {
            return Err(Error::shape_mismatch(op, &self.shape, &rhs.shape));
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&l, &r)| f(l, r))
            .collect();
        Ok(self.with_data(data, self.shape.clone()))
    }

    pub fn add(&self, rhs: &Self) -> Self {
        self.try_add(rhs).unwrap()
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, Error> {
        self.try_zip_map("add", rhs, |l, r| l + r)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        self.try_sub(rhs).unwrap()
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, Error> {
        self.try_zip_map("sub", rhs, |l, r| l - r)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        self.try_mul(rhs).unwrap()
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, Error> {
        self.try_zip_map("mul", rhs, |l, r| l * r)
    }

    /// Adds `rhs` to every trailing block of `self`. The shape of `rhs` must be a
    /// suffix of the shape of `self`, e.g. `[3]` for `[2, 3]`, or `[4, 3]` for `[5, 4, 3]`.
    ///
    /// ```rust
    /// # use sinew_core::prelude::*;
    /// # let dev: Cpu = Default::default();
    /// let a = dev.tensor([[1.0f32, 2.0], [3.0, 4.0]]);
    /// let b = dev.tensor([10.0f32, 20.0]);
    /// assert_eq!(a.add_broadcast(&b).as_vec(), [11.0, 22.0, 13.0, 24.0]);
    /// ```
    pub fn add_broadcast(&self, rhs: &Self) -> Self {
        self.try_add_broadcast(rhs).unwrap()
    }

    pub fn try_add_broadcast(&self, rhs: &Self) -> Result<Self, Error> {
        if !self.shape.ends_with(&rhs.shape) {
            return Err(Error::shape_mismatch("add_broadcast", &self.shape, &rhs.shape));
        }
        let block = rhs.numel();
        let data = if block == 0 {
            Vec::new()
        } else {
            self.data
                .chunks_exact(block)
                .flat_map(|chunk| chunk.iter().zip(rhs.data.iter()).map(|(&l, &r)| l + r))
                .collect()
        };
        Ok(self.with_data(data, self.shape.clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::*;

    #[test]
    fn test_add_sub_mul() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.tensor([[1.0, 2.0], [3.0, 4.0]]);
        let b: Tensor<TestDtype> = dev.tensor([[0.5, -1.0], [2.0, 0.0]]);
        assert_close_to_literal!(a.add(&b), [[1.5, 1.0], [5.0, 4.0]]);
        assert_close_to_literal!(a.sub(&b), [[0.5, 3.0], [1.0, 4.0]]);
        assert_close_to_literal!(a.mul(&b), [[0.5, -2.0], [6.0, 0.0]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.zeros(&[2, 3]);
        let b: Tensor<TestDtype> = dev.zeros(&[3, 2]);
        let err = a.try_add(&b).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { op: "add", .. }));
        assert_eq!(err.to_string(), "shape mismatch in add: [2, 3] vs [3, 2]");
    }

    #[test]
    fn test_add_broadcast() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.zeros(&[2, 2, 3]);
        let b: Tensor<TestDtype> = dev.tensor([1.0, 2.0, 3.0]);
        let r = a.add_broadcast(&b);
        assert_eq!(r.shape(), &[2, 2, 3]);
        assert_close_to_literal!(r, [[[1.0, 2.0, 3.0]; 2]; 2]);

        let c: Tensor<TestDtype> = dev.tensor([1.0, 2.0]);
        assert!(a.try_add_broadcast(&c).is_err());
    }
}
