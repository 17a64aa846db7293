//! Configuration Module
//!
//! Loads cache lifetimes from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{DEFAULT_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL, MAX_TTL};
use crate::error::{CacheError, Result};

/// Environment variable holding the entry TTL in seconds.
pub const TTL_VAR: &str = "CACHE_TTL_SECS";

/// Environment variable holding the sweep period in seconds.
pub const SWEEP_INTERVAL_VAR: &str = "CACHE_SWEEP_INTERVAL_SECS";

/// Product lists shown to a user stay valid for ten minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Cache configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of every entry
    pub ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds, at most 30 years (default: 600)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep period in seconds, non-zero and at
    ///   most 30 years (default: 3600)
    ///
    /// Missing variables take their default; present but malformed ones are
    /// an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ttl = parse_secs(&lookup, TTL_VAR)?.unwrap_or(defaults.ttl);
        let sweep_interval =
            parse_secs(&lookup, SWEEP_INTERVAL_VAR)?.unwrap_or(defaults.sweep_interval);

        if ttl > MAX_TTL {
            return Err(out_of_range(TTL_VAR, ttl, "ttl exceeds 30 years"));
        }
        if sweep_interval.is_zero() {
            return Err(out_of_range(
                SWEEP_INTERVAL_VAR,
                sweep_interval,
                "sweep interval must be positive",
            ));
        }
        if sweep_interval > MAX_SWEEP_INTERVAL {
            return Err(out_of_range(
                SWEEP_INTERVAL_VAR,
                sweep_interval,
                "sweep interval exceeds 30 years",
            ));
        }

        Ok(Self {
            ttl,
            sweep_interval,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

fn out_of_range(name: &str, value: Duration, reason: &str) -> CacheError {
    CacheError::InvalidConfig {
        name: name.to_string(),
        value: value.as_secs().to_string(),
        reason: reason.to_string(),
    }
}

fn parse_secs<F>(lookup: &F, name: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|err| CacheError::InvalidConfig {
            name: name.to_string(),
            value: raw.clone(),
            reason: err.to_string(),
        })
}
