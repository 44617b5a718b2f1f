//! In-memory TTL cache.
//!
//! Entries expire lazily: `get` and `has` drop an entry once its TTL has
//! elapsed, nothing is evicted in the background. The cache has a single
//! owner and lives as long as that owner does.

mod clock;
mod releases;

pub use clock::{Clock, SystemClock};
pub use releases::{CachedReleases, LATEST_RELEASE_KEY, LATEST_RELEASE_TTL_MINUTES};

#[cfg(test)]
pub use clock::ManualClock;

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;

/// TTL used by [`Cache::set_default`].
pub const DEFAULT_TTL_MINUTES: u64 = 10;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at: DateTime<Utc>,
    pub ttl_millis: i64,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.stored_at).num_milliseconds() > self.ttl_millis
    }
}

#[derive(Debug)]
pub struct Cache<T, C = SystemClock> {
    entries: HashMap<String, CacheEntry<T>>,
    clock: C,
}

impl<T> Cache<T, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for Cache<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> Cache<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl_minutes: u64) {
        let key = key.into();
        let ttl_millis = i64::try_from(ttl_minutes.saturating_mul(60_000)).unwrap_or(i64::MAX);
        debug!("Caching {} for {} minute(s)", key, ttl_minutes);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: self.clock.now(),
                ttl_millis,
            },
        );
    }

    pub fn set_default(&mut self, key: impl Into<String>, value: T) {
        self.set(key, value, DEFAULT_TTL_MINUTES);
    }

    pub fn get(&mut self, key: &str) -> Option<&T> {
        if !self.evict_if_expired(key) {
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.evict_if_expired(key)
    }

    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet looked up.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether a live entry exists for `key`, dropping it if expired.
    fn evict_if_expired(&mut self, key: &str) -> bool {
        let now = self.clock.now();
        match self.entries.get(key) {
            None => false,
            Some(entry) if entry.is_expired(now) => {
                debug!("Cache entry {} expired", key);
                self.entries.remove(key);
                false
            }
            Some(_) => true,
        }
    }
}
