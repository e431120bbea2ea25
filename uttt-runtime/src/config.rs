//! Runtime configuration for the batched self-play scheduler.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

/// Scheduler settings. Every field has a default so partial files load.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Number of self-play worker threads.
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    /// Largest evaluation batch the predictor will assemble.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Dispatcher poll interval while workers are busy.
    #[serde(default = "default_dispatch_poll_ms")]
    pub dispatch_poll_ms: u64,
    /// Worker poll interval while waiting for an assignment.
    #[serde(default = "default_task_wait_ms")]
    pub task_wait_ms: u64,
    /// Worker poll interval while waiting for an evaluation result.
    #[serde(default = "default_prediction_wait_ms")]
    pub prediction_wait_ms: u64,
    /// Predictor poll interval while no batch is ready.
    #[serde(default = "default_predictor_poll_ms")]
    pub predictor_poll_ms: u64,
}

fn default_num_workers() -> usize {
    4
}

fn default_max_batch_size() -> usize {
    4
}

fn default_dispatch_poll_ms() -> u64 {
    200
}

fn default_task_wait_ms() -> u64 {
    100
}

fn default_prediction_wait_ms() -> u64 {
    2
}

fn default_predictor_poll_ms() -> u64 {
    1
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            num_workers: default_num_workers(),
            max_batch_size: default_max_batch_size(),
            dispatch_poll_ms: default_dispatch_poll_ms(),
            task_wait_ms: default_task_wait_ms(),
            prediction_wait_ms: default_prediction_wait_ms(),
            predictor_poll_ms: default_predictor_poll_ms(),
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_workers == 0 {
            return Err(ConfigError::Invalid("num_workers must be > 0"));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::Invalid("max_batch_size must be > 0"));
        }
        Ok(())
    }
}

/// Load and validate a YAML config file.
pub fn load_config(path: impl AsRef<Path>) -> Result<RuntimeConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config: RuntimeConfig = serde_yaml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}
