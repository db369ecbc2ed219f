//! Per-session quota and cache around the orchestrator.

use crate::StoryOrchestrator;
use dreamtales_cache::{CacheConfig, ResultCache};
use dreamtales_core::{GenerationRequest, StoryBundle};
use dreamtales_error::DreamTalesResult;
use dreamtales_rate_limit::{Clock, QuotaConfig, QuotaTracker};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Session identifier.
pub type SessionId = Uuid;

/// Result of asking a session for a story.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// A bundle, either freshly produced or from the cache
    Delivered(StoryBundle),
    /// No tokens left in the current window
    QuotaExhausted {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl SessionOutcome {
    /// The delivered bundle, if any.
    pub fn bundle(&self) -> Option<&StoryBundle> {
        match self {
            SessionOutcome::Delivered(bundle) => Some(bundle),
            SessionOutcome::QuotaExhausted { .. } => None,
        }
    }

    /// Consume the outcome, keeping the bundle.
    pub fn into_bundle(self) -> Option<StoryBundle> {
        match self {
            SessionOutcome::Delivered(bundle) => Some(bundle),
            SessionOutcome::QuotaExhausted { .. } => None,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    quota: QuotaTracker,
    cache: ResultCache,
}

/// One user's story session.
///
/// Owns a quota tracker and a result cache. Every request runs admission,
/// cache lookup, generation and the consume-and-store step under one lock,
/// so a session never has two generations in flight and a token is spent
/// only together with its cache entry.
pub struct StorySession {
    id: SessionId,
    orchestrator: Arc<StoryOrchestrator>,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState>,
}

impl std::fmt::Debug for StorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorySession")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl StorySession {
    /// Start a session with a full quota and an empty cache.
    pub fn new(
        orchestrator: Arc<StoryOrchestrator>,
        quota: QuotaConfig,
        cache: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let id = Uuid::new_v4();
        let state = SessionState {
            quota: QuotaTracker::new(quota, clock.now()),
            cache: ResultCache::new(cache),
        };
        debug!(session = %id, "Opened story session");
        Self {
            id,
            orchestrator,
            clock,
            state: Mutex::new(state),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Ask for a story.
    ///
    /// Cache hits are free. A fresh generation, including a policy refusal,
    /// spends one token and is cached.
    ///
    /// # Errors
    ///
    /// Propagates text-stage failures. Nothing is spent or cached then.
    #[instrument(skip(self, request), fields(session = %self.id, topic = %request.topic()))]
    pub async fn request(&self, request: &GenerationRequest) -> DreamTalesResult<SessionOutcome> {
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        state.quota.reset_if_expired(now);

        if !state.quota.admit() {
            let retry_after = state.quota.retry_after(now);
            info!(retry_after_secs = retry_after.as_secs(), "Quota exhausted");
            return Ok(SessionOutcome::QuotaExhausted { retry_after });
        }

        let key = state.cache.key_for(request);
        if let Some(bundle) = state.cache.lookup(&key) {
            debug!("Serving cached bundle");
            return Ok(SessionOutcome::Delivered(bundle));
        }

        let bundle = self.orchestrator.produce(request).await?;

        state.quota.consume();
        state.cache.store(key, bundle.clone());
        info!(
            remaining = state.quota.remaining(),
            refused = *bundle.refused(),
            "Fresh story delivered"
        );

        Ok(SessionOutcome::Delivered(bundle))
    }

    /// Tokens left after applying any due reset.
    pub async fn remaining(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.quota.reset_if_expired(self.clock.now());
        state.quota.remaining()
    }

    /// Number of cached bundles.
    pub async fn cached(&self) -> usize {
        self.state.lock().await.cache.len()
    }
}
