//! Generation provider integrations for DreamTales.
//!
//! [`OpenAiClient`] talks to any OpenAI-compatible HTTP API and implements
//! every provider trait the story pipeline needs: chat completion, image
//! generation, text-to-speech and image download.
//!
//! # Example
//!
//! ```rust,no_run
//! use dreamtales_core::{CompletionRequest, Message};
//! use dreamtales_interface::TextCompletion;
//! use dreamtales_models::OpenAiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new()?;
//! let request = CompletionRequest::builder()
//!     .model("gpt-4o")
//!     .messages(vec![Message::user("Tell me a bedtime story")])
//!     .temperature(0.7)
//!     .build()?;
//!
//! let story = client.complete(&request).await?;
//! println!("{}", story);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageData,
    ImageGenerationRequest, ImageGenerationResponse, OpenAiClient, SpeechGenerationRequest,
    DEFAULT_BASE_URL,
};
