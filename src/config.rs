use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest CPU pacing delay accepted.
pub const MAX_CPU_THINK_DELAY_MS: u64 = 10_000;

/// Engine configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pause the presentation layer waits before asking the CPU to move.
    /// Pacing only; the engine never sleeps.
    pub cpu_think_delay_ms: u64,
    /// Seed for board shuffling and the easy CPU. None seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cpu_think_delay_ms: 1000,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from JSON text. Missing fields
    /// take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cpu_think_delay_ms > MAX_CPU_THINK_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "cpu_think_delay_ms must be <= {MAX_CPU_THINK_DELAY_MS}"
            )));
        }
        Ok(())
    }

    /// Random source for a new session.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
