pub mod activation;

pub use activation::Sigmoid;
