//! Stateless scalar activation functions.

pub fn relu(x: f32) -> f32 {
    x.max(0.)
}

pub fn tanh(x: f32) -> f32 {
    x.tanh()
}
