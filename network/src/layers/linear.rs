use tensor::Tensor;

use super::Forward;
use crate::{NetErr, Result};

/// A dense affine layer: `y[o] = b[o] + sum_i x[i] * w[i, o]`.
///
/// The weight matrix is addressed `(input, output)` and exclusively owned by the
/// layer, as is the bias vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
}

impl Linear {
    /// Creates a new `Linear` layer with every parameter set to zero.
    ///
    /// # Arguments
    /// * `dim` - The input and output widths.
    ///
    /// # Returns
    /// A new `Linear` or an error if the parameters couldn't be allocated.
    pub fn new(dim: (usize, usize)) -> Result<Self> {
        let (dim_in, dim_out) = dim;

        Ok(Self {
            weight: Tensor::new([dim_in, dim_out])?,
            bias: Tensor::new([dim_out])?,
        })
    }

    /// Creates a `Linear` layer from already populated parameters.
    ///
    /// # Arguments
    /// * `weight` - A rank-2 tensor of shape `(in, out)`.
    /// * `bias` - A rank-1 tensor of length `out`.
    ///
    /// # Returns
    /// The layer or `NetErr::ShapeMismatch` if the shapes don't agree.
    pub fn from_parts(weight: Tensor, bias: Tensor) -> Result<Self> {
        if weight.rank() != 2 {
            return Err(NetErr::ShapeMismatch {
                what: "weight rank",
                got: weight.rank(),
                expected: 2,
            });
        }

        if bias.rank() != 1 {
            return Err(NetErr::ShapeMismatch {
                what: "bias rank",
                got: bias.rank(),
                expected: 1,
            });
        }

        let dim_out = weight.shape()[1];
        if bias.len() != dim_out {
            return Err(NetErr::ShapeMismatch {
                what: "bias length",
                got: bias.len(),
                expected: dim_out,
            });
        }

        Ok(Self { weight, bias })
    }

    pub fn in_dim(&self) -> usize {
        self.weight.shape()[0]
    }

    pub fn out_dim(&self) -> usize {
        self.weight.shape()[1]
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// Gives mutable access to the row-major weights, the shape stays fixed.
    pub fn weight_mut(&mut self) -> &mut [f32] {
        self.weight.as_mut_slice()
    }

    pub fn bias_mut(&mut self) -> &mut [f32] {
        self.bias.as_mut_slice()
    }
}

impl Forward for Linear {
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        if x.rank() != 1 {
            return Err(NetErr::ShapeMismatch {
                what: "linear input rank",
                got: x.rank(),
                expected: 1,
            });
        }

        let (dim_in, dim_out) = (self.in_dim(), self.out_dim());
        if x.len() != dim_in {
            return Err(NetErr::ShapeMismatch {
                what: "linear input",
                got: x.len(),
                expected: dim_in,
            });
        }

        let mut y = Tensor::from_slice(self.bias.as_slice())?;
        let out = y.as_mut_slice();

        // Row `i` of the weights holds the contribution of `x[i]` to every output.
        for (&xi, w_row) in x.iter().zip(self.weight.as_slice().chunks_exact(dim_out.max(1))) {
            out.iter_mut().zip(w_row).for_each(|(o, &w)| *o += xi * w);
        }

        Ok(y)
    }
}
