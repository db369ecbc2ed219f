//! OpenAI wire types.

use derive_getters::Getters;
use dreamtales_core::{CompletionRequest, ImageRequest, Message, SpeechRequest};
use serde::{Deserialize, Serialize};

/// Chat message as sent to and received from `/chat/completions`.
pub type ChatMessage = Message;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation so far
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    temperature: f32,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model().clone(),
            messages: req.messages().clone(),
            temperature: *req.temperature(),
        }
    }
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChatMessage,
}

/// Response of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Generated choices; the first is used
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Body of `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageGenerationRequest {
    /// Model identifier
    model: String,
    /// Free-text prompt
    prompt: String,
    /// Pixel size
    size: String,
    /// Number of images
    n: u8,
}

impl From<&ImageRequest> for ImageGenerationRequest {
    fn from(req: &ImageRequest) -> Self {
        Self {
            model: req.model().clone(),
            prompt: req.prompt().clone(),
            size: req.size().clone(),
            n: *req.count(),
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageData {
    /// Hosted image URL
    #[serde(default)]
    url: Option<String>,
    /// Prompt after provider-side rewriting
    #[serde(default)]
    revised_prompt: Option<String>,
}

/// Response of `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageGenerationResponse {
    /// Generated images
    #[serde(default)]
    data: Vec<ImageData>,
}

impl ImageGenerationResponse {
    /// URL of the first image that has one.
    pub fn first_url(&self) -> Option<&str> {
        self.data.iter().find_map(|d| d.url.as_deref())
    }
}

/// Body of `POST /audio/speech`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SpeechGenerationRequest {
    /// Model identifier
    model: String,
    /// Voice identifier
    voice: String,
    /// Text to read aloud
    input: String,
}

impl From<&SpeechRequest> for SpeechGenerationRequest {
    fn from(req: &SpeechRequest) -> Self {
        Self {
            model: req.model().clone(),
            voice: req.voice().clone(),
            input: req.input().clone(),
        }
    }
}
