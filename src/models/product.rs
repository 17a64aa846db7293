//! Product model as returned by the storefront API.

use serde::{Deserialize, Serialize};

/// Telegram user identifier, the key of every product session.
pub type UserId = i64;

/// A digital good offered in the catalog or already purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Set for items in the user's purchase history
    #[serde(default)]
    pub purchased: bool,
    /// Download or repository link, only meaningful once purchased
    #[serde(default)]
    pub link: String,
}
