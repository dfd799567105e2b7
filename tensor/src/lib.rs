mod error;
mod interop;
mod tensor;

pub use error::{Result, TensorError};
pub use tensor::Tensor;
