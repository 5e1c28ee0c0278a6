mod display;
pub(crate) mod einsum;
pub(crate) mod errors;
mod iters;
mod ops;
mod shape;
mod tensor;
mod utils;

pub use tensor::Tensor;
