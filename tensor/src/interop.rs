//! Conversions between `Tensor` and other contiguous representations.

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::{Result, Tensor, TensorError};

impl Tensor {
    /// Reinterprets the contiguous buffer as raw bytes, e.g. for a device upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Borrows the tensor as an `ndarray` view with the same shape and layout.
    ///
    /// # Returns
    /// The view, or `TensorError::SizeMismatch` for a rank-0 tensor, since `ndarray`
    /// expects a 0-d array to hold exactly one element.
    pub fn view(&self) -> Result<ArrayViewD<'_, f32>> {
        ArrayViewD::from_shape(IxDyn(self.shape()), self.as_slice()).map_err(|_| {
            TensorError::SizeMismatch {
                what: "ndarray view",
                got: self.len(),
                expected: self.shape().iter().product(),
            }
        })
    }
}

impl TryFrom<ArrayD<f32>> for Tensor {
    type Error = TensorError;

    fn try_from(array: ArrayD<f32>) -> Result<Self> {
        let shape = array.shape().to_vec();
        let values = array.iter().copied().collect();
        Tensor::from_shape_vec(shape, values)
    }
}
