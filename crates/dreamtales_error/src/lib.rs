//! Error types for the DreamTales story pipeline.
//!
//! This crate provides the foundation error types used throughout the DreamTales workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use dreamtales_error::{DreamTalesResult, GenerationError, GenerationErrorKind};
//!
//! fn fetch_story() -> DreamTalesResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::EmptyStory))?
//! }
//!
//! match fetch_story() {
//!     Ok(story) => println!("Got: {}", story),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod provider;
mod render;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{DreamTalesError, DreamTalesErrorKind, DreamTalesResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use provider::{ProviderError, ProviderErrorKind, ProviderStage};
pub use render::{RenderError, RenderErrorKind};
pub use storage::{StorageError, StorageErrorKind};
