//! Story bundle memoization.
//!
//! This crate caches completed bundles per session so that repeating a
//! request skips the providers entirely.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheConfig, CacheConfigBuilder, CacheKey, CacheKeyPolicy, ResultCache};
