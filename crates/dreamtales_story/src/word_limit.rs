//! Single story at a target word count.

use crate::{word_limited_messages, ModelConfig, PipelineConfig, WordLimitConfig};
use dreamtales_core::CompletionRequest;
use dreamtales_error::{
    BuilderError, DreamTalesResult, GenerationError, GenerationErrorKind, ProviderError,
    ProviderErrorKind, ProviderStage,
};
use dreamtales_interface::TextCompletion;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Asks for a story of an exact length and retries a bounded number of
/// times until one lands within the tolerance.
pub struct WordLimitedGenerator {
    text: Arc<dyn TextCompletion>,
    models: ModelConfig,
    config: WordLimitConfig,
    stage_timeout: Duration,
}

impl WordLimitedGenerator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no attempt would ever be made.
    pub fn new(
        text: Arc<dyn TextCompletion>,
        models: ModelConfig,
        config: WordLimitConfig,
    ) -> DreamTalesResult<Self> {
        config.validate()?;
        Ok(Self {
            text,
            models,
            config,
            stage_timeout: PipelineConfig::default().stage_timeout(),
        })
    }

    /// Bound each completion call by `timeout` instead of the pipeline default.
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Settings in use.
    pub fn config(&self) -> &WordLimitConfig {
        &self.config
    }

    /// Generate at the configured default word count.
    pub async fn generate_default(&self, idea: &str) -> DreamTalesResult<String> {
        self.generate(idea, *self.config.word_limit()).await
    }

    /// Generate a story about `idea` with about `word_limit` words.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::EmptyTopic`] for a blank idea,
    /// propagates provider failures and timeouts immediately, and returns
    /// [`GenerationErrorKind::WordLimitExhausted`] once every attempt missed.
    #[instrument(skip(self), fields(max_attempts = *self.config.max_attempts()))]
    pub async fn generate(&self, idea: &str, word_limit: usize) -> DreamTalesResult<String> {
        if idea.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyTopic).into());
        }

        let request = CompletionRequest::builder()
            .model(self.models.text_model().as_str())
            .messages(word_limited_messages(idea, word_limit))
            .temperature(*self.models.temperature())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let tolerance = *self.config.tolerance();
        let max_attempts = *self.config.max_attempts();
        let mut last_word_count = 0;

        for attempt in 1..=max_attempts {
            let story = tokio::time::timeout(self.stage_timeout, self.text.complete(&request))
                .await
                .map_err(|_| {
                    ProviderError::new(
                        ProviderStage::Text,
                        ProviderErrorKind::Timeout(self.stage_timeout.as_secs()),
                    )
                })??;
            let story = story.trim();
            let word_count = story.split_whitespace().count();

            if word_count.abs_diff(word_limit) <= tolerance {
                info!(attempt, word_count, "Story within word limit");
                return Ok(story.to_string());
            }

            warn!(attempt, word_count, word_limit, "Story missed word limit");
            last_word_count = word_count;
        }

        Err(GenerationError::new(GenerationErrorKind::WordLimitExhausted {
            word_limit,
            tolerance,
            attempts: max_attempts,
            last_word_count,
        })
        .into())
    }
}
