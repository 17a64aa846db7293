//! Storefront session owner
//!
//! Holds one product session cache per bot feature and tears them all down
//! together.

use tracing::info;

use crate::config::CacheConfig;
use crate::sessions::ProductSessions;

/// Session caches for the catalog and purchase-history features.
pub struct Storefront {
    catalog: ProductSessions,
    purchased: ProductSessions,
}

impl Storefront {
    /// Creates both session caches from one configuration.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            catalog: ProductSessions::new(config),
            purchased: ProductSessions::new(config),
        }
    }

    /// Products offered for sale, as last listed to each user.
    pub fn catalog(&self) -> &ProductSessions {
        &self.catalog
    }

    /// Products each user already owns, as last listed to them.
    pub fn purchased(&self) -> &ProductSessions {
        &self.purchased
    }

    /// Stops every session cache and waits for their sweepers.
    ///
    /// Safe to call more than once.
    pub async fn shutdown(&self) {
        tokio::join!(self.catalog.shutdown(), self.purchased.shutdown());
        info!("Storefront sessions shut down");
    }
}
