//! Quota configuration.

use chrono::TimeDelta;
use derive_getters::Getters;
use dreamtales_error::{ConfigError, DreamTalesResult};
use serde::{Deserialize, Serialize};

/// Session quota settings.
///
/// # Example
///
/// ```toml
/// [quota]
/// max_tokens = 4
/// reset_interval_secs = 28800
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct QuotaConfig {
    /// Fresh generations allowed per window
    #[serde(default = "default_max_tokens")]
    #[builder(default = "default_max_tokens()")]
    max_tokens: u32,

    /// Window length in seconds
    #[serde(default = "default_reset_interval_secs")]
    #[builder(default = "default_reset_interval_secs()")]
    reset_interval_secs: u64,
}

fn default_max_tokens() -> u32 {
    2
}

fn default_reset_interval_secs() -> u64 {
    8 * 60 * 60
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            reset_interval_secs: default_reset_interval_secs(),
        }
    }
}

impl QuotaConfig {
    /// Creates a new builder.
    pub fn builder() -> QuotaConfigBuilder {
        QuotaConfigBuilder::default()
    }

    /// Window length as a signed time delta.
    pub fn reset_interval(&self) -> TimeDelta {
        i64::try_from(self.reset_interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Checks that the quota can ever admit a request.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_tokens` or `reset_interval_secs` is zero.
    pub fn validate(&self) -> DreamTalesResult<()> {
        if self.max_tokens == 0 {
            return Err(ConfigError::new("quota.max_tokens must be at least 1").into());
        }
        if self.reset_interval_secs == 0 {
            return Err(ConfigError::new("quota.reset_interval_secs must be at least 1").into());
        }
        Ok(())
    }
}
