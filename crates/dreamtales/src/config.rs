//! Layered configuration.
//!
//! Values come from the bundled `dreamtales.toml`, then
//! `~/.config/dreamtales/dreamtales.toml`, then `./dreamtales.toml`, with
//! later files overriding earlier ones key by key.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use derive_getters::Getters;
use dreamtales_cache::CacheConfig;
use dreamtales_error::{ConfigError, DreamTalesError, DreamTalesResult};
use dreamtales_rate_limit::QuotaConfig;
use dreamtales_render::RenderConfig;
use dreamtales_story::{ModelConfig, PipelineConfig, WordLimitConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../dreamtales.toml");

/// Complete DreamTales configuration.
///
/// Every section is optional; missing sections and keys fall back to their
/// defaults.
///
/// # Example
///
/// ```no_run
/// use dreamtales::DreamTalesConfig;
///
/// let config = DreamTalesConfig::load()?;
/// println!("{} stories per window", config.quota().max_tokens());
/// # Ok::<(), dreamtales::DreamTalesError>(())
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct DreamTalesConfig {
    /// Session quota
    #[serde(default)]
    quota: QuotaConfig,
    /// Result cache
    #[serde(default)]
    cache: CacheConfig,
    /// Provider models
    #[serde(default)]
    models: ModelConfig,
    /// Pipeline behavior
    #[serde(default)]
    pipeline: PipelineConfig,
    /// Storybook layout
    #[serde(default)]
    render: RenderConfig,
    /// Word-limited stories
    #[serde(default)]
    word_limit: WordLimitConfig,
}

impl DreamTalesConfig {
    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> DreamTalesResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file is malformed or the merged
    /// settings are invalid.
    #[instrument]
    pub fn load() -> DreamTalesResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/dreamtales/dreamtales.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("dreamtales").required(false));

        Self::finish(builder)
    }

    /// Parse TOML text on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or the settings are invalid.
    pub fn from_toml(text: &str) -> DreamTalesResult<Self> {
        let builder = Config::builder().add_source(File::from_str(text, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> DreamTalesResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            DreamTalesError::from(ConfigError::new(format!(
                "Failed to serialize configuration: {}",
                e
            )))
        })
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> DreamTalesResult<()> {
        self.quota.validate()?;
        self.pipeline.validate()?;
        self.render.validate()?;
        self.word_limit.validate()?;
        Ok(())
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> DreamTalesResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                DreamTalesError::from(ConfigError::new(format!(
                    "Failed to read configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DreamTalesError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        debug!(
            max_tokens = config.quota.max_tokens(),
            key_policy = %config.cache.key_policy(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
