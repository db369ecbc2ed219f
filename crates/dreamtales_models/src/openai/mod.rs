//! OpenAI-compatible API integration.

mod client;
mod dto;

pub use client::{OpenAiClient, DEFAULT_BASE_URL};
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageData,
    ImageGenerationRequest, ImageGenerationResponse, SpeechGenerationRequest,
};
