//! Sessions Module
//!
//! Per-user state the storefront bot keeps between a command and the button
//! callbacks that follow it.

mod products;
mod storefront;

pub use products::ProductSessions;
pub use storefront::Storefront;
