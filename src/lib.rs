//! Session Cache - generic TTL cache for storefront bot sessions
//!
//! Provides a concurrency-safe key/value cache whose entries expire a fixed
//! time after being written, with a background sweeper and a one-shot stop.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod sessions;
mod tasks;

pub use cache::{CacheStats, TtlCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use models::{Product, UserId};
pub use sessions::{ProductSessions, Storefront};
