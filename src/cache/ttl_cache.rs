//! TTL Cache Module
//!
//! Thread-safe handle over the cache store that owns the background sweeper and
//! its one-shot shutdown.

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::warn;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheStats, CacheStore, Lookup};
use crate::config::CacheConfig;
use crate::tasks::spawn_sweeper;

/// Period between background sweeps unless configured otherwise.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Smallest sweep period accepted; shorter periods are raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Largest sweep period accepted; longer periods are cut down to this.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 365 * 86_400);

/// Longest entry lifetime; longer TTLs are cut down to this.
pub const MAX_TTL: Duration = Duration::from_secs(30 * 365 * 86_400);

// == Shared State ==
/// State reachable from both the cache handle and its sweeper.
#[derive(Debug)]
pub(crate) struct Shared<K, V> {
    store: RwLock<CacheStore<K, V>>,
    stats: StatsCounters,
    stopped: AtomicBool,
}

impl<K, V> Shared<K, V>
where
    K: Eq + Hash,
{
    /// Removes every entry expired as of `now` under a single write lock.
    ///
    /// Returns `None` without touching the store once the cache is stopped.
    /// The flag is read under the lock, so only a sweep already holding the
    /// lock when stop is called can complete after it.
    pub(crate) fn sweep(&self, now: Instant) -> Option<usize> {
        let mut store = self.store.write();
        if self.stopped.load(Ordering::Acquire) {
            return None;
        }
        let removed = store.purge_expired(now);
        self.stats.record_sweep(removed);
        Some(removed)
    }
}

// == TTL Cache ==
/// Generic key/value cache where every entry expires a fixed time after it
/// was written.
///
/// Reads share the store lock; writes, deletes and the removal of an expired
/// entry found by a read take it exclusively. Expired entries that are never
/// read again are reclaimed by a background sweeper spawned on construction.
///
/// The creator must call [`stop`](Self::stop) or [`shutdown`](Self::shutdown)
/// when done. Dropping the cache also stops the sweeper.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use std::time::Duration;
/// use session_cache::TtlCache;
///
/// let cache: TtlCache<i64, Vec<&str>> = TtlCache::new(Duration::from_secs(600));
/// cache.set(42, vec!["A", "B"]);
/// assert_eq!(cache.get(&42), Some(vec!["A", "B"]));
/// cache.shutdown().await;
/// # }
/// ```
pub struct TtlCache<K, V> {
    shared: Arc<Shared<K, V>>,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache with the given TTL, sweeping once an hour.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a cache from loaded configuration.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::with_sweep_interval(config.ttl, config.sweep_interval)
    }

    /// Creates a cache with the given TTL and sweep period.
    ///
    /// The TTL is capped at [`MAX_TTL`] and the period is kept between
    /// [`MIN_SWEEP_INTERVAL`] and [`MAX_SWEEP_INTERVAL`].
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            store: RwLock::new(CacheStore::new(ttl)),
            stats: StatsCounters::default(),
            stopped: AtomicBool::new(false),
        });
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweeper(
            Arc::downgrade(&shared),
            sweep_interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL),
            shutdown_rx,
        );

        Self {
            shared,
            shutdown_tx,
            sweeper: Mutex::new(Some(handle)),
        }
    }

    // == Set ==
    /// Inserts or replaces the value for `key`, restarting its TTL.
    pub fn set(&self, key: K, value: V) {
        let now = Instant::now();
        self.shared.store.write().set(key, value, now);
    }

    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// Returns `None` when the key was never written, was deleted, or has
    /// expired. An expired entry is removed as part of the read.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let now = Instant::now();
        {
            let store = self.shared.store.read();
            match store.lookup(key, now) {
                Lookup::Live(value) => {
                    self.shared.stats.record_hit();
                    return Some(value.clone());
                }
                Lookup::Absent => {
                    self.shared.stats.record_miss();
                    return None;
                }
                Lookup::Expired => {}
            }
        }

        self.shared.stats.record_miss();
        if self.shared.store.write().evict_if_expired(key, now) {
            self.shared.stats.record_lazy_eviction();
        }
        None
    }

    // == Delete ==
    /// Removes `key` if present.
    pub fn delete(&self, key: &K) {
        self.shared.store.write().remove(key);
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for its task to finish.
    ///
    /// Safe to call repeatedly; only the first call waits on the task.
    pub async fn shutdown(&self) {
        self.stop();
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(error = %err, "Cache sweeper ended abnormally");
            }
        }
    }

    /// Returns the fixed lifetime of entries in this cache.
    pub fn ttl(&self) -> Duration {
        self.shared.store.read().ttl()
    }

    /// Returns the number of entries held, including expired ones not yet
    /// reclaimed.
    pub fn len(&self) -> usize {
        self.shared.store.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.store.read().is_empty()
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.shared.stats.snapshot()
    }
}

impl<K, V> TtlCache<K, V> {
    // == Stop ==
    /// Signals the sweeper to exit.
    ///
    /// Only the first call has an effect; later and concurrent calls return
    /// immediately. Reads and writes keep working after stop.
    pub fn stop(&self) {
        if self.shared.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shutdown_tx.send_replace(true);
    }

    /// Returns true once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::Acquire)
    }
}

impl<K, V> Drop for TtlCache<K, V> {
    fn drop(&mut self) {
        self.stop();
    }
}
