use serde::{Deserialize, Serialize};

use crate::dataset::boolean::BooleanOp;
use crate::error::{Result, ShallowNnError};

pub const DEFAULT_EPOCHS: usize = 10_000;
pub const DEFAULT_RUN_LEARNING_RATE: f64 = 0.1;

/// Settings for one training run of the command-line program.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "problem": "and", "epochs": 5000, "learning_rate": 0.5, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub problem: BooleanOp,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seed for weight initialization and shuffling; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            problem: BooleanOp::default(),
            epochs: DEFAULT_EPOCHS,
            learning_rate: DEFAULT_RUN_LEARNING_RATE,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Rejects learning rates that are not finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ShallowNnError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Applies values given on the command line over this config; `None` keeps
    /// the current value. The merged config is validated.
    pub fn merge_overrides(
        mut self,
        problem: Option<BooleanOp>,
        epochs: Option<usize>,
        learning_rate: Option<f64>,
        seed: Option<u64>,
    ) -> Result<TrainConfig> {
        if let Some(problem) = problem {
            self.problem = problem;
        }
        if let Some(epochs) = epochs {
            self.epochs = epochs;
        }
        if let Some(learning_rate) = learning_rate {
            self.learning_rate = learning_rate;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config previously written by `save_json` or by hand.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
