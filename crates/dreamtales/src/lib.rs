//! DreamTales - bedtime stories on demand.
//!
//! A topic goes in; a story, an illustration, a narration and a printable
//! PDF storybook come out. Each session may generate a bounded number of
//! fresh stories per window and replays earlier results for free.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dreamtales::{
//!     DreamTalesConfig, FileSystemStorage, GenerationRequest, OpenAiClient, PdfRenderer,
//!     SessionRegistry, StoryLength, StoryOrchestrator,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DreamTalesConfig::load()?;
//!     let client = Arc::new(OpenAiClient::new()?);
//!
//!     let orchestrator = StoryOrchestrator::builder()
//!         .text(client.clone())
//!         .image(client.clone())
//!         .speech(client.clone())
//!         .fetcher(client)
//!         .renderer(Arc::new(PdfRenderer::new(config.render().clone())?))
//!         .storage(Arc::new(FileSystemStorage::temporary()?))
//!         .build()?;
//!
//!     let registry = SessionRegistry::new(
//!         Arc::new(orchestrator),
//!         config.quota().clone(),
//!         config.cache().clone(),
//!     );
//!     let (_, session) = registry.open().await;
//!
//!     let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short)?;
//!     let outcome = session.request(&request).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `dreamtales_error` - Error types
//! - `dreamtales_core` - Requests, bundles and provider payloads
//! - `dreamtales_interface` - Provider, renderer and storage traits
//! - `dreamtales_rate_limit` - Session quota
//! - `dreamtales_cache` - Result cache
//! - `dreamtales_storage` - Content-addressed artifact storage
//! - `dreamtales_models` - OpenAI-compatible provider client
//! - `dreamtales_render` - PDF storybook renderer
//! - `dreamtales_story` - Orchestration, sessions and word-limited stories
//!
//! This crate re-exports everything and adds layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::DreamTalesConfig;

pub use dreamtales_error::{
    BuilderError, BuilderErrorKind, ConfigError, DreamTalesError, DreamTalesErrorKind,
    DreamTalesResult, GenerationError, GenerationErrorKind, ProviderError, ProviderErrorKind,
    ProviderStage, RenderError, RenderErrorKind, StorageError, StorageErrorKind,
};

pub use dreamtales_core::{
    ArtifactKind, ArtifactReference, CompletionRequest, GenerationRequest, ImageRequest, Message,
    Role, SpeechRequest, StageTimings, StoryBundle, StoryDocument, StoryLength,
};

pub use dreamtales_interface::{
    ArtifactStorage, DocumentRenderer, ImageFetch, ImageSynthesis, SpeechSynthesis,
    TextCompletion,
};

pub use dreamtales_rate_limit::{Clock, ManualClock, QuotaConfig, QuotaTracker, SystemClock};

pub use dreamtales_cache::{CacheConfig, CacheKey, CacheKeyPolicy, ResultCache};

pub use dreamtales_storage::FileSystemStorage;

pub use dreamtales_models::{OpenAiClient, DEFAULT_BASE_URL};

pub use dreamtales_render::{PdfRenderer, RenderConfig};

pub use dreamtales_story::{
    ModelConfig, PipelineConfig, RefusalPolicy, SessionId, SessionOutcome, SessionRegistry,
    StoryOrchestrator, StorySession, WordLimitConfig, WordLimitedGenerator,
    DEFAULT_REFUSAL_SENTINEL,
};
