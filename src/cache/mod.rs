//! Cache Module
//!
//! Provides a generic in-memory cache with a fixed TTL, lazy eviction on read
//! and periodic background sweeping.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use stats::CacheStats;
pub use ttl_cache::{
    TtlCache, DEFAULT_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL, MAX_TTL, MIN_SWEEP_INTERVAL,
};

pub(crate) use entry::CacheEntry;
pub(crate) use store::{CacheStore, Lookup};
pub(crate) use ttl_cache::Shared;
