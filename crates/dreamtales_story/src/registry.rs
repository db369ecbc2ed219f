//! Lookup of live sessions.

use crate::{SessionId, StoryOrchestrator, StorySession};
use dreamtales_cache::CacheConfig;
use dreamtales_rate_limit::{Clock, QuotaConfig, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Holds the sessions of one process.
///
/// All sessions share the orchestrator and settings but own their quota and
/// cache.
pub struct SessionRegistry {
    orchestrator: Arc<StoryOrchestrator>,
    quota: QuotaConfig,
    cache: CacheConfig,
    clock: Arc<dyn Clock>,
    sessions: RwLock<HashMap<SessionId, Arc<StorySession>>>,
}

impl SessionRegistry {
    /// Registry whose sessions use the wall clock.
    pub fn new(
        orchestrator: Arc<StoryOrchestrator>,
        quota: QuotaConfig,
        cache: CacheConfig,
    ) -> Self {
        Self {
            orchestrator,
            quota,
            cache,
            clock: Arc::new(SystemClock),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Use another time source for new sessions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Open a new session.
    #[instrument(skip(self))]
    pub async fn open(&self) -> (SessionId, Arc<StorySession>) {
        let session = Arc::new(StorySession::new(
            Arc::clone(&self.orchestrator),
            self.quota.clone(),
            self.cache.clone(),
            Arc::clone(&self.clock),
        ));
        let id = session.id();

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Arc::clone(&session));
        debug!(session = %id, open_sessions = sessions.len(), "Registered session");

        (id, session)
    }

    /// Find a session.
    pub async fn get(&self, id: SessionId) -> Option<Arc<StorySession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    ///
    /// Callers still holding the session can finish their request.
    #[instrument(skip(self))]
    pub async fn close(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        debug!(removed, "Closed session");
        removed
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Check if no sessions are open.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
