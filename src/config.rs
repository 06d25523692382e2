//! The options record accepted by the training entry point.
//!
//! ```
//! # use backprop::config::TrainingConfig;
//! let config = TrainingConfig::from_json(r#"{
//!     "layers": [2, 8, 3],
//!     "activation": "tanh",
//!     "learning_type": "mini_batch",
//!     "batch_size": 4,
//!     "epochs": 500,
//!     "max_error": 0.01,
//!     "eta": 0.1
//! }"#).unwrap();
//! let network = config.network().unwrap();
//! assert_eq!(network.topology(), &[2, 8, 3]);
//! ```

use serde_derive::{Deserialize, Serialize};

use crate::activator::{Activator, OutputActivator};
use crate::error::{Error, Result};
use crate::feed_forward::Network;
use crate::trainer::{LearningMode, Logging, Trainer, DEFAULT_BATCH_SIZE};

/// How often the weights are updated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningType {
    Online,
    Batch,
    MiniBatch,
}

/// Everything needed to build and train a network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Widths of every layer, input first.
    pub layers: Vec<i64>,
    /// Activation of the hidden layers.
    pub activation: Activator,
    #[serde(default)]
    pub output_activation: OutputActivator,
    pub learning_type: LearningType,
    /// Only used for mini-batches; anything `<= 0` means the default of 5.
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,
    pub epochs: usize,
    pub max_error: f64,
    pub eta: f64,
    /// Seeds parameter initialization and shuffling.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Log progress every this many epochs.
    #[serde(default)]
    pub log_every: Option<usize>,
}

fn default_batch_size() -> i64 {
    DEFAULT_BATCH_SIZE as i64
}

impl TrainingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The layer widths as a topology, rejecting non-positive widths.
    pub fn topology(&self) -> Result<Vec<usize>> {
        if self.layers.len() < 2 || self.layers.iter().any(|&width| width < 1) {
            return Err(Error::InvalidTopology {
                layers: self.layers.iter().map(|&width| width.max(0) as usize).collect(),
            });
        }
        Ok(self.layers.iter().map(|&width| width as usize).collect())
    }

    pub fn learning_mode(&self) -> LearningMode {
        match self.learning_type {
            LearningType::Online => LearningMode::Online,
            LearningType::Batch => LearningMode::Batch,
            LearningType::MiniBatch if self.batch_size <= 0 => {
                LearningMode::MiniBatch(DEFAULT_BATCH_SIZE)
            }
            LearningType::MiniBatch => LearningMode::MiniBatch(self.batch_size as usize),
        }
    }

    /// Builds an untrained network.
    pub fn network(&self) -> Result<Network> {
        let topology = self.topology()?;
        let network = match self.seed {
            Some(seed) => Network::with_seed(&topology, self.activation, seed)?,
            None => Network::new(&topology, self.activation)?,
        };
        Ok(network.output_activator(self.output_activation))
    }

    /// Builds a trainer with this configuration's schedule.
    pub fn trainer<'a>(&self) -> Trainer<'a> {
        let logging = match self.log_every {
            Some(every) => Logging::Epochs(every),
            None => Logging::Completion,
        };
        let trainer = Trainer::new()
            .learning_mode(self.learning_mode())
            .learning_rate(self.eta)
            .epochs(self.epochs)
            .max_error(self.max_error)
            .logging(logging);
        match self.seed {
            Some(seed) => trainer.seed(seed),
            None => trainer,
        }
    }
}
