use serde::{Deserialize, Serialize};

/// Per-epoch training statistics reported to the observer after every epoch.
///
/// Errors are measured on the outputs each example produced right before its
/// own weight update, so they describe the epoch as it was trained rather than
/// the final weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number, counted across every `train` call on the network.
    pub epoch: usize,
    /// Σ over examples and outputs of (expected - output)².
    pub squared_error: f64,
    /// Mean per-example MSE.
    pub mean_loss: f64,
    /// Wall-clock duration of this epoch in microseconds.
    pub elapsed_us: u64,
}
