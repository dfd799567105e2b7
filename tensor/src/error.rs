use std::{
    collections::TryReserveError,
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire tensor module.
pub type Result<T> = std::result::Result<T, TensorError>;

/// Contract violations and allocation failures of tensor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The amount of axes involved doesn't match the tensor's rank.
    RankMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An element count or length doesn't match the expected one.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    AxisOutOfRange {
        axis: usize,
        rank: usize,
    },
    IndexOutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },
    /// The element buffer could not be (re)allocated.
    Alloc {
        requested: usize,
    },
}

impl TensorError {
    pub(crate) fn alloc(requested: usize, _: TryReserveError) -> Self {
        Self::Alloc { requested }
    }
}

impl Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::RankMismatch {
                what,
                got,
                expected,
            } => write!(f, "rank mismatch for {what}: got {got}, expected {expected}"),
            TensorError::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            TensorError::AxisOutOfRange { axis, rank } => {
                write!(f, "axis {axis} is out of range for a tensor of rank {rank}")
            }
            TensorError::IndexOutOfRange {
                axis,
                index,
                extent,
            } => write!(
                f,
                "index {index} is out of range for axis {axis} of extent {extent}"
            ),
            TensorError::Alloc { requested } => {
                write!(f, "failed to allocate a buffer of {requested} elements")
            }
        }
    }
}

impl Error for TensorError {}
