//! Model and pipeline settings.

use crate::DEFAULT_REFUSAL_SENTINEL;
use derive_getters::Getters;
use dreamtales_error::{ConfigError, DreamTalesResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which remote models and voices the pipeline asks for.
///
/// ```toml
/// [models]
/// text_model = "gpt-4o"
/// temperature = 0.7
/// image_model = "dall-e-3"
/// image_size = "1024x1024"
/// speech_model = "tts-1"
/// voice = "alloy"
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(setter(into))]
pub struct ModelConfig {
    /// Chat completion model
    #[serde(default = "default_text_model")]
    #[builder(default = "default_text_model()")]
    text_model: String,

    /// Sampling temperature for story text
    #[serde(default = "default_temperature")]
    #[builder(default = "default_temperature()")]
    temperature: f32,

    /// Image generation model
    #[serde(default = "default_image_model")]
    #[builder(default = "default_image_model()")]
    image_model: String,

    /// Generated image size
    #[serde(default = "default_image_size")]
    #[builder(default = "default_image_size()")]
    image_size: String,

    /// Text-to-speech model
    #[serde(default = "default_speech_model")]
    #[builder(default = "default_speech_model()")]
    speech_model: String,

    /// Narration voice
    #[serde(default = "default_voice")]
    #[builder(default = "default_voice()")]
    voice: String,
}

fn default_text_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            temperature: default_temperature(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            speech_model: default_speech_model(),
            voice: default_voice(),
        }
    }
}

impl ModelConfig {
    /// Creates a new builder.
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }
}

/// Orchestration behavior.
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
#[setters(prefix = "with_", into)]
#[builder(setter(into))]
pub struct PipelineConfig {
    /// Upper bound for any single provider call, in seconds
    #[serde(default = "default_stage_timeout_secs")]
    #[builder(default = "default_stage_timeout_secs()")]
    stage_timeout_secs: u64,

    /// Phrase the text model is told to answer with for unsuitable topics
    #[serde(default = "default_refusal_sentinel")]
    #[builder(default = "default_refusal_sentinel()")]
    refusal_sentinel: String,

    /// Whether to render a PDF storybook
    #[serde(default = "default_true")]
    #[builder(default = "default_true()")]
    render_document: bool,

    /// Whether to narrate the story
    #[serde(default = "default_true")]
    #[builder(default = "default_true()")]
    narrate: bool,
}

fn default_stage_timeout_secs() -> u64 {
    60
}

fn default_refusal_sentinel() -> String {
    DEFAULT_REFUSAL_SENTINEL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_timeout_secs: default_stage_timeout_secs(),
            refusal_sentinel: default_refusal_sentinel(),
            render_document: default_true(),
            narrate: default_true(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Provider call bound as a duration.
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }

    /// Rejects settings that would make every call fail or every story look
    /// like a refusal.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero timeout or a blank sentinel.
    pub fn validate(&self) -> DreamTalesResult<()> {
        if self.stage_timeout_secs == 0 {
            return Err(ConfigError::new("pipeline.stage_timeout_secs must be at least 1").into());
        }
        if self.refusal_sentinel.trim().is_empty() {
            return Err(ConfigError::new("pipeline.refusal_sentinel cannot be blank").into());
        }
        Ok(())
    }
}

/// Settings for [`WordLimitedGenerator`](crate::WordLimitedGenerator).
///
/// ```toml
/// [word_limit]
/// word_limit = 100
/// tolerance = 10
/// max_attempts = 3
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct WordLimitConfig {
    /// Target word count when the caller does not give one
    #[serde(default = "default_word_limit")]
    #[builder(default = "default_word_limit()")]
    word_limit: usize,

    /// Accepted distance from the target, in words
    #[serde(default = "default_tolerance")]
    #[builder(default = "default_tolerance()")]
    tolerance: usize,

    /// Generations tried before giving up
    #[serde(default = "default_max_attempts")]
    #[builder(default = "default_max_attempts()")]
    max_attempts: u32,
}

fn default_word_limit() -> usize {
    100
}

fn default_tolerance() -> usize {
    10
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for WordLimitConfig {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            tolerance: default_tolerance(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl WordLimitConfig {
    /// Creates a new builder.
    pub fn builder() -> WordLimitConfigBuilder {
        WordLimitConfigBuilder::default()
    }

    /// Checks that at least one attempt will be made.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` or `word_limit` is zero.
    pub fn validate(&self) -> DreamTalesResult<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::new("word_limit.max_attempts must be at least 1").into());
        }
        if self.word_limit == 0 {
            return Err(ConfigError::new("word_limit.word_limit must be at least 1").into());
        }
        Ok(())
    }
}
