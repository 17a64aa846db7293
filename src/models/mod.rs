//! Domain models shared with the storefront's bot handlers
//!
//! Only what the session caches need to hold and hand back.

pub mod product;

pub use product::{Product, UserId};
