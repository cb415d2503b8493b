//! Local cache for API responses
//!
//! Only folder listings are cached. Each one is scoped to the principal that
//! fetched it and expires after the configured number of minutes.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Convert the configured cache lifetime into a TTL
pub fn ttl_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

pub use client::CachedSkyfishClient;
pub use key::cache_key;
pub use storage::CacheStorage;
