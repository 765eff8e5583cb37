//! Harness configuration.
//!
//! The random seed and trial count are the only externally tunable
//! parameters of the testing surface. They load from TOML, with a missing
//! file falling back to defaults:
//!
//! ```
//! use weightforge_testkit::HarnessConfig;
//!
//! let config = HarnessConfig::load("harness.toml").unwrap_or_default();
//! assert_eq!(config.seed, 403);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Seed and repeat count for a conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Seed for the deterministic generator streams.
    pub seed: u64,
    /// Number of randomized trials per weight type.
    pub repeat: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            seed: 403,
            repeat: 10_000,
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
