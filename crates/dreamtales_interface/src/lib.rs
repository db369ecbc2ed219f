//! Trait definitions for the DreamTales story pipeline.
//!
//! The orchestrator only sees these traits. Remote providers, the document
//! renderer and artifact storage are plugged in behind them, which keeps the
//! pipeline testable with in-process doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{
    ArtifactStorage, DocumentRenderer, ImageFetch, ImageSynthesis, SpeechSynthesis,
    TextCompletion,
};
