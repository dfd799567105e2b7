use std::fmt;

use tensor::Tensor;

use super::{Linear, ReLU, Tanh};
use crate::Result;

/// A pure transform from one tensor to another.
///
/// Implementations must not keep mutable state across calls, the same layer is
/// evaluated concurrently over different rows of a batch.
pub trait Forward: Send + Sync {
    fn forward(&self, x: &Tensor) -> Result<Tensor>;
}

/// A network layer.
pub enum Layer {
    Linear(Linear),
    ReLU(ReLU),
    Tanh(Tanh),
    /// A caller-defined layer.
    Custom(Box<dyn Forward>),
}

impl Layer {
    /// Creates a zero-initialized `Linear` layer mapping `dim.0` inputs to `dim.1` outputs.
    pub fn linear(dim: (usize, usize)) -> Result<Self> {
        Ok(Self::Linear(Linear::new(dim)?))
    }

    pub fn relu() -> Self {
        Self::ReLU(ReLU)
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh)
    }

    pub fn custom<F>(layer: F) -> Self
    where
        F: Forward + 'static,
    {
        Self::Custom(Box::new(layer))
    }

    /// Returns a stable identifier for the layer kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Linear(_) => "linear",
            Layer::ReLU(_) => "relu",
            Layer::Tanh(_) => "tanh",
            Layer::Custom(_) => "custom",
        }
    }
}

impl Forward for Layer {
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        match self {
            Layer::Linear(l) => l.forward(x),
            Layer::ReLU(l) => l.forward(x),
            Layer::Tanh(l) => l.forward(x),
            Layer::Custom(l) => l.forward(x),
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Linear(l) => f.debug_tuple("Linear").field(l).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

impl From<Linear> for Layer {
    fn from(value: Linear) -> Self {
        Self::Linear(value)
    }
}

impl From<ReLU> for Layer {
    fn from(value: ReLU) -> Self {
        Self::ReLU(value)
    }
}

impl From<Tanh> for Layer {
    fn from(value: Tanh) -> Self {
        Self::Tanh(value)
    }
}
