//! Rolling-window quota tracker.

use crate::QuotaConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counts the fresh generations left in the current window.
///
/// The tracker does no I/O and never reads the clock itself; callers pass
/// `now` so windows can be tested with simulated time.
///
/// Invariant: `remaining` stays within `[0, max_tokens]`.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    config: QuotaConfig,
    remaining: u32,
    window_start: DateTime<Utc>,
}

impl QuotaTracker {
    /// Start a full window at `now`.
    pub fn new(config: QuotaConfig, now: DateTime<Utc>) -> Self {
        tracing::debug!(
            max_tokens = config.max_tokens(),
            reset_interval_secs = config.reset_interval_secs(),
            "Creating new QuotaTracker"
        );
        Self {
            remaining: *config.max_tokens(),
            config,
            window_start: now,
        }
    }

    /// Whether a fresh generation may run. Does not mutate state.
    pub fn admit(&self) -> bool {
        self.remaining > 0
    }

    /// Refill the window once the reset interval has strictly elapsed.
    ///
    /// Calling it again before the next expiry is a no-op.
    pub fn reset_if_expired(&mut self, now: DateTime<Utc>) {
        if now - self.window_start > self.config.reset_interval() {
            tracing::info!(
                previous_remaining = self.remaining,
                max_tokens = self.config.max_tokens(),
                "Quota window expired, refilling"
            );
            self.remaining = *self.config.max_tokens();
            self.window_start = now;
        }
    }

    /// Spend one token.
    ///
    /// Callers must have seen `admit()` return true. Consuming from an empty
    /// window is a programming error: it asserts in debug builds and leaves
    /// the counter at zero in release builds.
    pub fn consume(&mut self) {
        debug_assert!(self.remaining > 0, "consume() called on an exhausted quota");
        if self.remaining == 0 {
            tracing::error!("consume() called on an exhausted quota");
            return;
        }
        self.remaining -= 1;
        tracing::debug!(remaining = self.remaining, "Consumed quota token");
    }

    /// Tokens left in the current window.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Start of the current window.
    pub fn window_start(&self) -> DateTime<Utc> {
        self.window_start
    }

    /// Configured limits.
    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Time until the window may be refilled, zero if it already may.
    pub fn retry_after(&self, now: DateTime<Utc>) -> Duration {
        let elapsed = now - self.window_start;
        self.config
            .reset_interval()
            .checked_sub(&elapsed)
            .and_then(|left| left.to_std().ok())
            .unwrap_or(Duration::ZERO)
    }
}
