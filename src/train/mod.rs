pub mod epoch_stats;
pub mod loop_fn;
pub mod observer;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use observer::{
    ExampleRecord, JsonLinesObserver, NoopObserver, StatsRecorder, TracingObserver,
    TrainingObserver, WriterObserver,
};
pub use train_config::TrainConfig;
