//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiry Sweeper: Removes expired cache entries at a fixed interval

mod sweeper;

pub(crate) use sweeper::spawn_sweeper;
