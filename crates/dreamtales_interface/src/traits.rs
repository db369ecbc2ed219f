//! Trait definitions for providers and pipeline collaborators.

use async_trait::async_trait;
use dreamtales_core::{
    ArtifactKind, ArtifactReference, CompletionRequest, ImageRequest, SpeechRequest,
    StoryDocument,
};
use dreamtales_error::DreamTalesResult;

/// Remote text-completion capability.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete a chat conversation and return the generated text.
    async fn complete(&self, req: &CompletionRequest) -> DreamTalesResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

/// Remote image-synthesis capability.
#[async_trait]
pub trait ImageSynthesis: Send + Sync {
    /// Generate an image and return a retrievable reference to it.
    async fn synthesize_image(&self, req: &ImageRequest) -> DreamTalesResult<String>;
}

/// Remote text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    /// Read the input text aloud and return encoded audio bytes.
    async fn synthesize_speech(&self, req: &SpeechRequest) -> DreamTalesResult<Vec<u8>>;
}

/// Retrieves the bytes behind an image reference.
#[async_trait]
pub trait ImageFetch: Send + Sync {
    /// Download the image at `url`.
    async fn fetch_image(&self, url: &str) -> DreamTalesResult<Vec<u8>>;
}

/// Turns story text and an optional illustration into a paginated document.
pub trait DocumentRenderer: Send + Sync {
    /// Render the document and return the encoded file.
    fn render(&self, document: &StoryDocument) -> DreamTalesResult<Vec<u8>>;

    /// MIME type of the rendered output.
    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }
}

/// Pluggable storage for generated artifacts.
///
/// References returned by `store` stay valid for as long as the backend
/// lives.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Store bytes and return a reference.
    async fn store(
        &self,
        data: &[u8],
        kind: ArtifactKind,
        mime_type: &str,
    ) -> DreamTalesResult<ArtifactReference>;

    /// Retrieve bytes by reference.
    async fn retrieve(&self, reference: &ArtifactReference) -> DreamTalesResult<Vec<u8>>;

    /// Delete an artifact.
    async fn delete(&self, reference: &ArtifactReference) -> DreamTalesResult<()>;

    /// Check whether an artifact exists.
    async fn exists(&self, reference: &ArtifactReference) -> DreamTalesResult<bool>;
}
