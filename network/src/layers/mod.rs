mod layer;
mod linear;
mod relu;
mod tanh;

pub use layer::{Forward, Layer};
pub use linear::Linear;
pub use relu::ReLU;
pub use tanh::Tanh;
