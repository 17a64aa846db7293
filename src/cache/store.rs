//! Cache Store Module
//!
//! Unsynchronized key/value map with per-entry expiration. Callers supply the
//! current instant so that every decision in here is deterministic; locking
//! lives one level up in [`TtlCache`](crate::cache::TtlCache).

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, MAX_TTL};

// == Lookup ==
/// Outcome of a read against the store.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a, V> {
    /// Entry present and not yet expired
    Live(&'a V),
    /// Entry present but past its deadline
    Expired,
    /// No entry for the key
    Absent,
}

// == Cache Store ==
/// Key/value storage where every entry carries an expiration instant.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Lifetime stamped onto every write
    ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`, capped at
    /// [`MAX_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: ttl.min(MAX_TTL),
        }
    }

    /// Returns the fixed lifetime of entries in this store.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Inserts or fully replaces the entry for `key`, expiring at `now + ttl`.
    pub fn set(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now, self.ttl));
    }

    // == Lookup ==
    /// Reads `key` as of `now` without modifying the store.
    pub fn lookup(&self, key: &K, now: Instant) -> Lookup<'_, V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => Lookup::Expired,
            Some(entry) => Lookup::Live(&entry.value),
            None => Lookup::Absent,
        }
    }

    // == Evict If Expired ==
    /// Removes `key` only if its entry is still expired as of `now`.
    ///
    /// A fresh entry written between an expired read and this call is kept.
    /// Returns true if an entry was removed.
    pub fn evict_if_expired(&mut self, key: &K, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));
        if expired {
            self.entries.remove(key);
        }
        expired
    }

    // == Remove ==
    /// Removes the entry for `key`. Returns true if one was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Purge Expired ==
    /// Removes every entry expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    #[test]
    fn test_store_new() {
        let store: CacheStore<u32, String> = CacheStore::new(TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.ttl(), TTL);
    }

    #[test]
    fn test_store_caps_ttl() {
        let store: CacheStore<u32, u32> = CacheStore::new(Duration::MAX);
        assert_eq!(store.ttl(), MAX_TTL);
    }

    #[test]
    fn test_store_set_and_lookup() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.set("key1", "value1".to_string(), now);

        assert_eq!(
            store.lookup(&"key1", now),
            Lookup::Live(&"value1".to_string())
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_nonexistent() {
        let store: CacheStore<&str, u8> = CacheStore::new(TTL);
        assert_eq!(store.lookup(&"missing", Instant::now()), Lookup::Absent);
    }

    #[test]
    fn test_store_lookup_expired_does_not_remove() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);
        store.set(1, 'a', now);

        assert_eq!(store.lookup(&1, now + TTL), Lookup::Expired);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_deadline() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.set(7, "first", now);
        store.set(7, "second", now + Duration::from_secs(5));

        // Past the first deadline but inside the second one
        let later = now + Duration::from_secs(12);
        assert_eq!(store.lookup(&7, later), Lookup::Live(&"second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_evict_if_expired() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);
        store.set(1, "value", now);

        assert!(!store.evict_if_expired(&1, now));
        assert_eq!(store.len(), 1);

        assert!(store.evict_if_expired(&1, now + TTL));
        assert_eq!(store.lookup(&1, now + TTL), Lookup::Absent);
        assert!(!store.evict_if_expired(&1, now + TTL));
    }

    #[test]
    fn test_store_evict_keeps_rewritten_entry() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);
        store.set(1, "old", now);

        // Rewritten after the reader saw it expired
        store.set(1, "new", now + TTL);

        assert!(!store.evict_if_expired(&1, now + TTL));
        assert_eq!(store.lookup(&1, now + TTL), Lookup::Live(&"new"));
    }

    #[test]
    fn test_store_remove() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);
        store.set("key1", 1, now);

        assert!(store.remove(&"key1"));
        assert!(store.is_empty());
        assert!(!store.remove(&"key1"));
    }

    #[test]
    fn test_store_purge_expired() {
        let now = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.set("key1", 1, now);
        store.set("key2", 2, now + Duration::from_secs(5));

        let removed = store.purge_expired(now + TTL);
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup(&"key2", now + TTL), Lookup::Live(&2));

        assert_eq!(store.purge_expired(now + TTL), 0);
    }
}
