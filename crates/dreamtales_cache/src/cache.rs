//! Session result cache implementation.

use derive_getters::Getters;
use dreamtales_core::{GenerationRequest, StoryBundle, StoryLength};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which request fields identify a cached bundle.
///
/// The length class is part of the prompt but not of the default key, so a
/// MEDIUM request for a topic already generated as SHORT is served the SHORT
/// bundle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyPolicy {
    /// Topic only
    #[display("topic")]
    Topic,
    /// Topic and subject name
    #[default]
    #[display("topic_and_subject")]
    TopicAndSubject,
    /// Topic, subject name and length class
    #[display("topic_subject_and_length")]
    TopicSubjectAndLength,
}

/// Cache key derived from a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    topic: String,
    subject: Option<String>,
    length: Option<StoryLength>,
}

impl CacheKey {
    /// Derive the key for `request` under `policy`.
    ///
    /// Pure and deterministic: equal inputs always give equal keys.
    pub fn new(request: &GenerationRequest, policy: CacheKeyPolicy) -> Self {
        let subject = match policy {
            CacheKeyPolicy::Topic => None,
            _ => Some(request.subject_name().to_string()),
        };
        let length = match policy {
            CacheKeyPolicy::TopicSubjectAndLength => Some(request.length()),
            _ => None,
        };
        Self {
            topic: request.topic().to_string(),
            subject,
            length,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.topic)?;
        if let Some(subject) = &self.subject {
            write!(f, "|{}", subject)?;
        }
        if let Some(length) = &self.length {
            write!(f, "|{}", length)?;
        }
        Ok(())
    }
}

/// Configuration for the result cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// Fields that identify a request
    #[serde(default)]
    #[builder(default)]
    key_policy: CacheKeyPolicy,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_policy: CacheKeyPolicy::default(),
            enabled: default_enabled(),
        }
    }
}

impl CacheConfig {
    /// Creates a new builder.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }
}

/// Per-session map from request key to completed bundle.
///
/// Entries live as long as the session. There is no eviction and no TTL.
///
/// # Example
///
/// ```
/// use dreamtales_cache::{CacheConfig, ResultCache};
/// use dreamtales_core::{GenerationRequest, StoryBundle, StoryLength};
///
/// let mut cache = ResultCache::new(CacheConfig::default());
/// let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short).unwrap();
/// let key = cache.key_for(&request);
///
/// assert!(cache.lookup(&key).is_none());
///
/// let bundle = StoryBundle::builder().story("Once upon a time...").build().unwrap();
/// cache.store(key.clone(), bundle);
///
/// let hit = cache.lookup(&key).unwrap();
/// assert!(*hit.from_cache());
/// ```
#[derive(Debug, Clone)]
pub struct ResultCache {
    config: CacheConfig,
    entries: HashMap<CacheKey, StoryBundle>,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            key_policy = %config.key_policy,
            enabled = config.enabled,
            "Creating new ResultCache"
        );
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Key for `request` under the configured policy.
    pub fn key_for(&self, request: &GenerationRequest) -> CacheKey {
        CacheKey::new(request, self.config.key_policy)
    }

    /// Look up a bundle.
    ///
    /// The returned copy is marked `from_cache` so callers can skip quota
    /// consumption and non-idempotent side effects.
    #[tracing::instrument(skip(self), fields(key = %key, cache_size = self.entries.len()))]
    pub fn lookup(&self, key: &CacheKey) -> Option<StoryBundle> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let bundle = self.entries.get(key)?;
        tracing::debug!("Cache hit");
        Some(bundle.marked_from_cache(true))
    }

    /// Store a bundle, overwriting any previous entry for the key.
    #[tracing::instrument(skip(self, bundle), fields(key = %key, cache_size = self.entries.len()))]
    pub fn store(&mut self, key: CacheKey, bundle: StoryBundle) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping store");
            return;
        }

        let replaced = self
            .entries
            .insert(key, bundle.marked_from_cache(false))
            .is_some();
        tracing::debug!(replaced, "Stored bundle in cache");
    }

    /// Number of cached bundles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured behavior.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
