//! Requests sent to the remote generation providers.

use crate::Message;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Text-completion request.
///
/// # Examples
///
/// ```
/// use dreamtales_core::{CompletionRequest, Message};
///
/// let request = CompletionRequest::builder()
///     .model("gpt-4o")
///     .messages(vec![Message::user("Hello!")])
///     .temperature(0.7)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model(), "gpt-4o");
/// assert_eq!(request.messages().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Model identifier
    model: String,
    /// Ordered role-tagged messages
    messages: Vec<Message>,
    /// Sampling temperature
    temperature: f32,
}

impl CompletionRequest {
    /// Creates a new builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Image-synthesis request.
///
/// # Examples
///
/// ```
/// use dreamtales_core::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .model("dall-e-3")
///     .prompt("A cozy bedroom under the stars")
///     .size("1024x1024")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Model identifier
    model: String,
    /// Free-text prompt
    prompt: String,
    /// Pixel size, e.g. "1024x1024"
    size: String,
    /// Number of images to generate
    #[builder(default = "1")]
    count: u8,
}

impl ImageRequest {
    /// Creates a new builder.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// Speech-synthesis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Model identifier
    model: String,
    /// Voice identifier
    voice: String,
    /// Text to read aloud
    input: String,
}

impl SpeechRequest {
    /// Creates a new builder.
    pub fn builder() -> SpeechRequestBuilder {
        SpeechRequestBuilder::default()
    }
}
