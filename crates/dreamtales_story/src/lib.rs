//! Story orchestration for DreamTales.
//!
//! - [`StoryOrchestrator`] runs text, image, speech and document stages for
//!   one request.
//! - [`StorySession`] wraps it with a quota and a result cache.
//! - [`SessionRegistry`] keeps many sessions apart.
//! - [`WordLimitedGenerator`] writes single stories at a target length.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;
mod policy;
mod prompts;
mod registry;
mod session;
mod word_limit;

pub use config::{
    ModelConfig, ModelConfigBuilder, PipelineConfig, PipelineConfigBuilder, WordLimitConfig,
    WordLimitConfigBuilder,
};
pub use orchestrator::{StoryOrchestrator, StoryOrchestratorBuilder};
pub use policy::{RefusalPolicy, DEFAULT_REFUSAL_SENTINEL};
pub use prompts::{image_prompt, story_brief, story_messages, word_limited_messages};
pub use registry::SessionRegistry;
pub use session::{SessionId, SessionOutcome, StorySession};
pub use word_limit::WordLimitedGenerator;
