pub mod activations;
mod config;
mod error;
pub mod layers;
mod network;

pub use config::ForwardConfig;
pub use error::{NetErr, Result};
pub use layers::{Forward, Layer};
pub use network::Network;
pub use tensor::{Tensor, TensorError};
