use log::{debug, trace};
use rayon::prelude::*;
use tensor::{Tensor, TensorError};

use crate::{
    ForwardConfig, NetErr, Result,
    layers::{Forward, Layer},
};

/// A sequential network: each layer's output is the next layer's input, in
/// insertion order.
///
/// Layer shapes aren't checked against each other when they are added, a
/// mismatch surfaces as an error on the first forward pass that hits it.
#[derive(Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a new `Network`.
    ///
    /// # Arguments
    /// * `layers` - The layers the network is composed of, in evaluation order.
    ///
    /// # Returns
    /// A new `Network` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Appends a layer, taking ownership of it.
    pub fn push<L>(&mut self, layer: L)
    where
        L: Into<Layer>,
    {
        self.layers.push(layer.into());
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the width of a batched forward's output rows.
    ///
    /// # Returns
    /// The output width of the last layer, or an error if the network is empty or
    /// its last layer isn't `Linear`.
    pub fn output_width(&self) -> Result<usize> {
        match self.layers.last() {
            None => Err(NetErr::EmptyNetwork),
            Some(Layer::Linear(l)) => Ok(l.out_dim()),
            Some(other) => Err(NetErr::LastLayerNotLinear { kind: other.kind() }),
        }
    }

    /// Evaluates a batch one row at a time with the default configuration.
    ///
    /// See [`Network::forward_batch_with`].
    pub fn forward_batch(&self, x: &Tensor) -> Result<Tensor> {
        self.forward_batch_with(x, &ForwardConfig::default())
    }

    /// Evaluates a batch one row at a time.
    ///
    /// Every row of `x` is copied out, sent through all the layers and its result is
    /// written to the same row of the output. Rows don't share any state, so they
    /// may be evaluated in parallel.
    ///
    /// # Arguments
    /// * `x` - A rank-2 tensor of shape `(batch_size, input_width)`.
    /// * `config` - How the rows get scheduled.
    ///
    /// # Returns
    /// A tensor of shape `(batch_size, output_width)` or the first error found.
    pub fn forward_batch_with(&self, x: &Tensor, config: &ForwardConfig) -> Result<Tensor> {
        if x.rank() != 2 {
            return Err(NetErr::BatchRank { got: x.rank() });
        }

        let width = self.output_width()?;
        let (rows, in_width) = (x.shape()[0], x.shape()[1]);
        let mut out = Tensor::new([rows, width])?;

        // Zero-width rows can't be chunked.
        let parallel = config.parallel() && in_width > 0 && width > 0;
        debug!(rows = rows, width = width, parallel = parallel; "batched forward");

        if !parallel {
            for r in 0..rows {
                let y = self.forward(&x.row(r)?)?;
                out.set_row(r, &y)?;
            }

            return Ok(out);
        }

        out.as_mut_slice()
            .par_chunks_mut(width)
            .zip(x.as_slice().par_chunks(in_width))
            .with_min_len(config.min_rows_per_task())
            .try_for_each(|(out_row, x_row)| -> Result<()> {
                let y = self.forward(&Tensor::from_slice(x_row)?)?;

                if y.len() != out_row.len() {
                    return Err(NetErr::from(TensorError::SizeMismatch {
                        what: "row length",
                        got: y.len(),
                        expected: out_row.len(),
                    }));
                }

                out_row.copy_from_slice(y.as_slice());
                Ok(())
            })?;

        Ok(out)
    }
}

impl Forward for Network {
    /// Feeds `x` through every layer. An empty network returns a copy of `x`.
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let Some((first, rest)) = self.layers.split_first() else {
            return Ok(x.clone());
        };

        trace!(layer = 0, kind = first.kind(); "forward");
        let mut y = first.forward(x)?;

        for (i, layer) in rest.iter().enumerate() {
            trace!(layer = i + 1, kind = layer.kind(); "forward");
            y = layer.forward(&y)?;
        }

        Ok(y)
    }
}

impl FromIterator<Layer> for Network {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self::new(iter)
    }
}
