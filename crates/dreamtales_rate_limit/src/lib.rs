//! Session-scoped generation quota.
//!
//! Every session gets a small number of fresh generations per rolling window.
//! Cache hits are free; only fresh generations consume a token.
//!
//! ```
//! use chrono::{TimeDelta, Utc};
//! use dreamtales_rate_limit::{QuotaConfig, QuotaTracker};
//!
//! let start = Utc::now();
//! let mut quota = QuotaTracker::new(QuotaConfig::default(), start);
//!
//! quota.reset_if_expired(start);
//! assert!(quota.admit());
//! quota.consume();
//! quota.consume();
//! assert!(!quota.admit());
//!
//! let later = start + TimeDelta::hours(8) + TimeDelta::seconds(1);
//! quota.reset_if_expired(later);
//! assert!(quota.admit());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{QuotaConfig, QuotaConfigBuilder};
pub use tracker::QuotaTracker;
