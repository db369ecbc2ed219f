//! Core data types for the DreamTales story pipeline.
//!
//! This crate provides the value types shared by every other DreamTales crate:
//! story requests, provider requests, generated bundles and artifact references.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod bundle;
mod document;
mod length;
mod message;
mod provider_request;
mod request;
mod role;

pub use artifact::{ArtifactKind, ArtifactReference};
pub use bundle::{StageTimings, StoryBundle, StoryBundleBuilder};
pub use document::StoryDocument;
pub use length::StoryLength;
pub use message::Message;
pub use provider_request::{
    CompletionRequest, CompletionRequestBuilder, ImageRequest, ImageRequestBuilder, SpeechRequest,
    SpeechRequestBuilder,
};
pub use request::GenerationRequest;
pub use role::Role;
