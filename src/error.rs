//! Error types for the session cache
//!
//! Provides unified error handling using thiserror. The cache core itself is
//! infallible; these cover configuration loading and product session lookups.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// An environment variable was present but unusable
    #[error("Invalid configuration: {name}={value:?} ({reason})")]
    InvalidConfig {
        name: String,
        value: String,
        reason: String,
    },

    /// The user's product list is gone or the index points outside it
    #[error("Product not found")]
    ProductNotFound,

    /// The callback payload was not a product index
    #[error("Invalid product index: {0:?}")]
    InvalidIndex(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
