//! Cache Entry Module
//!
//! Defines a single stored value together with its absolute expiration instant.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::MAX_TTL;

// == Cache Entry ==
/// A stored value and the instant after which it is no longer served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiration instant, fixed at write time
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    ///
    /// Lifetimes longer than [`MAX_TTL`] are cut down to it.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or_else(|| now + MAX_TTL);

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches the expiration instant, so an
    /// entry written with a zero TTL is never served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
