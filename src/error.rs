use thiserror::Error;

/// Errors raised around the training core: loading run configuration and
/// writing diagnostics. Training itself cannot fail.
#[derive(Error, Debug)]
pub enum ShallowNnError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ShallowNnError>;
