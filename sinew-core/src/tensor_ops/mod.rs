//! Operations on tensors like [relu()](crate::tensor::Tensor::relu),
//! [matmul()](crate::tensor::Tensor::matmul), and [add()](crate::tensor::Tensor::add).
//!
//! Every operation comes in two flavors:
//! 1. `try_<op>`, which returns `Result<Tensor<E>, Error>`
//! 2. `<op>`, which panics on error
//!
//! Operations never modify their inputs; they allocate a new tensor with a new
//! [UniqueId](crate::tensor::UniqueId).
//!
//! # Shape rules
//!
//! - Unary operations keep the shape.
//! - [add](crate::tensor::Tensor::add), [sub](crate::tensor::Tensor::sub) and
//!   [mul](crate::tensor::Tensor::mul) require identical shapes.
//! - [add_broadcast](crate::tensor::Tensor::add_broadcast) requires the rhs shape to
//!   be a suffix of the lhs shape.
//! - [matmul](crate::tensor::Tensor::matmul) contracts the last lhs axis with the
//!   first rhs axis.
//!
//! Anything else is reported as [Error::ShapeMismatch](crate::tensor::Error::ShapeMismatch).

mod binary;
mod matmul;
mod unary;
