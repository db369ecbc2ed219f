//! PDF storybook rendering for DreamTales.
//!
//! Rendering happens in three pure steps:
//!
//! 1. [`sanitize`] maps text onto what the base PDF fonts can show.
//! 2. [`wrap_text`] and [`layout`] break the story into lines and pages.
//! 3. [`PdfRenderer`] writes those pages, plus an optional illustration, as a PDF.
//!
//! # Example
//!
//! ```
//! use dreamtales_core::StoryDocument;
//! use dreamtales_interface::DocumentRenderer;
//! use dreamtales_render::PdfRenderer;
//!
//! let renderer = PdfRenderer::default();
//! let document = StoryDocument::new("A Sleepy Bunny", "Once upon a time...");
//! let pdf = renderer.render(&document).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod layout;
mod pdf;
mod text;

pub use config::{RenderConfig, RenderConfigBuilder};
pub use layout::{layout, LayoutItem, PageLayout};
pub use pdf::PdfRenderer;
pub use text::{sanitize, wrap_text};
