//! Story generation requests.

use crate::StoryLength;
use dreamtales_error::{DreamTalesResult, GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// An immutable request for one story bundle.
///
/// # Examples
///
/// ```
/// use dreamtales_core::{GenerationRequest, StoryLength};
///
/// let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short)
///     .unwrap()
///     .with_subject_name("Mia");
///
/// assert_eq!(request.topic(), "a sleepy bunny");
/// assert_eq!(request.subject_name(), "Mia");
/// assert!(GenerationRequest::new("   ", StoryLength::Short).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationRequest {
    topic: String,
    length: StoryLength,
    #[serde(default)]
    subject_name: String,
}

impl GenerationRequest {
    /// Create a request, rejecting empty topics.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::EmptyTopic`] when the topic is empty or
    /// whitespace only.
    pub fn new(topic: impl Into<String>, length: StoryLength) -> DreamTalesResult<Self> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyTopic).into());
        }
        Ok(Self {
            topic,
            length,
            subject_name: String::new(),
        })
    }

    /// Attach the name of the child the story is for.
    pub fn with_subject_name(mut self, subject_name: impl Into<String>) -> Self {
        self.subject_name = subject_name.into();
        self
    }

    /// Story topic as entered.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Requested length class.
    pub fn length(&self) -> StoryLength {
        self.length
    }

    /// Subject name; empty when none was given.
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Subject name, or `None` when it is blank.
    pub fn subject(&self) -> Option<&str> {
        let name = self.subject_name.trim();
        (!name.is_empty()).then_some(name)
    }
}
