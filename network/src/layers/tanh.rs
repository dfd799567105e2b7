use tensor::Tensor;

use super::Forward;
use crate::{Result, activations};

/// Elementwise hyperbolic tangent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl Forward for Tanh {
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        Ok(x.map(activations::tanh))
    }
}
