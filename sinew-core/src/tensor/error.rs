/// Represents the errors that can occur from creating tensors, launching
/// tensor operations, running modules, or saving & loading them.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not enough elements were provided when creating a tensor
    #[error("expected {expected} elements, found {found}")]
    WrongNumElements { expected: usize, found: usize },

    /// The shapes of the operands are not compatible for `op`
    #[error("shape mismatch in {op}: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// `op` only supports tensors with `expected` dimensions
    #[error("{op} expects a {expected}d tensor, found shape {found:?}")]
    WrongRank {
        op: &'static str,
        expected: usize,
        found: Vec<usize>,
    },

    /// `low` and `high` do not describe a finite, non-empty range
    #[error("cannot sample uniformly from [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },

    /// A module that opted out of serialization was asked to save or load itself
    #[error("{0} cannot be serialized")]
    NotSerializable(String),

    /// A stored tensor has a different element type than the one it is loaded into
    #[error("{key} is stored as {found:?}, expected {expected:?}")]
    WrongDtype {
        key: String,
        expected: safetensors::Dtype,
        found: safetensors::Dtype,
    },

    #[error(transparent)]
    SafeTensors(#[from] safetensors::SafeTensorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Raised by user supplied functions, e.g. the ones wrapped in a `Functional` module.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub(crate) fn shape_mismatch(op: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        Self::ShapeMismatch {
            op,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }
}
