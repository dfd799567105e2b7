//! Dense tensors and forward-only feed-forward networks.

pub use network::{
    Forward, ForwardConfig, Layer, NetErr, Network, activations,
    layers::{Linear, ReLU, Tanh},
};
pub use tensor::{Tensor, TensorError};
