use tensor::Tensor;

use super::Forward;
use crate::{Result, activations};

/// Elementwise `max(0, x)`, keeps the input's shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReLU;

impl Forward for ReLU {
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        Ok(x.map(activations::relu))
    }
}
