//! Freshness rule for cached feeds
//!
//! A cached feed is valid while the current time is strictly before the save
//! timestamp plus `MAX_CACHE_AGE_DAYS` calendar days. The current time is
//! always supplied by the caller.

use chrono::{DateTime, Days, Utc};

/// Number of days a saved feed stays valid
pub const MAX_CACHE_AGE_DAYS: u64 = 7;

/// Whether a feed saved at `timestamp` is still valid at `now`
pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match timestamp.checked_add_days(Days::new(MAX_CACHE_AGE_DAYS)) {
        Some(max_cache_age) => now < max_cache_age,
        None => false,
    }
}
