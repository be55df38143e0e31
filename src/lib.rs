pub mod activation;
pub mod dataset;
pub mod error;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::activation::Sigmoid;
pub use dataset::boolean::BooleanOp;
pub use error::{Result, ShallowNnError};
pub use layers::dense::Dense;
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{EpochStats, ExampleRecord, TrainConfig, TrainingObserver};
