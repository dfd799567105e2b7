use std::{
    error::Error,
    fmt::{self, Display},
};

use tensor::TensorError;

/// The result type used in the entire network module.
pub type Result<T> = std::result::Result<T, NetErr>;

/// The network module's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetErr {
    Tensor(TensorError),
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyNetwork,
    LastLayerNotLinear {
        kind: &'static str,
    },
    BatchRank {
        got: usize,
    },
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::Tensor(e) => write!(f, "tensor error: {e}"),
            NetErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a shape mismatch for {what}, got {got} and expected {expected}"
            ),
            NetErr::EmptyNetwork => write!(f, "the network has no layers"),
            NetErr::LastLayerNotLinear { kind } => write!(
                f,
                "batched forward needs the last layer to be linear, got {kind}"
            ),
            NetErr::BatchRank { got } => {
                write!(f, "batched input must have rank 2, got rank {got}")
            }
        }
    }
}

impl Error for NetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetErr::Tensor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TensorError> for NetErr {
    fn from(value: TensorError) -> Self {
        Self::Tensor(value)
    }
}
