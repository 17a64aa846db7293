//! Product Sessions
//!
//! Remembers the product list last shown to each user so that a button
//! callback carrying only an index can be resolved back to a product.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{CacheStats, TtlCache};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{Product, UserId};

/// Per-user product lists with a fixed lifetime.
pub struct ProductSessions {
    cache: TtlCache<UserId, Arc<[Product]>>,
}

impl ProductSessions {
    /// Creates sessions backed by a cache built from `config`.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: TtlCache::with_config(config),
        }
    }

    /// Stores the list just shown to `user`, replacing any earlier one.
    pub fn remember(&self, user: UserId, products: impl Into<Arc<[Product]>>) {
        self.cache.set(user, products.into());
    }

    /// Returns the list last shown to `user`, if it is still live.
    pub fn products(&self, user: UserId) -> Option<Arc<[Product]>> {
        self.cache.get(&user)
    }

    /// Resolves a callback payload to the product at that position.
    ///
    /// # Errors
    /// - `InvalidIndex` if `raw_index` is not an integer
    /// - `ProductNotFound` if the session is gone or the index is out of range
    pub fn product_at(&self, user: UserId, raw_index: &str) -> Result<Product> {
        let index: i64 = raw_index
            .trim()
            .parse()
            .map_err(|_| CacheError::InvalidIndex(raw_index.to_string()))?;

        let products = self.products(user).ok_or(CacheError::ProductNotFound)?;
        let index = usize::try_from(index).map_err(|_| CacheError::ProductNotFound)?;

        products
            .get(index)
            .cloned()
            .ok_or(CacheError::ProductNotFound)
    }

    /// Returns the cached list for `user`, fetching it upstream on a miss.
    ///
    /// Either way the list is written back, restarting its lifetime. Errors
    /// from `fetch` are returned unchanged and leave the cache untouched.
    pub async fn load_or_fetch<F, Fut, E>(
        &self,
        user: UserId,
        fetch: F,
    ) -> std::result::Result<Arc<[Product]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<Product>, E>>,
    {
        let products = match self.products(user) {
            Some(products) => products,
            None => fetch().await?.into(),
        };

        self.cache.set(user, Arc::clone(&products));
        Ok(products)
    }

    /// Drops the session for `user`.
    pub fn forget(&self, user: UserId) {
        self.cache.delete(&user);
    }

    /// Returns the underlying cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Stops background sweeping and waits for it to finish.
    pub async fn shutdown(&self) {
        self.cache.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const USER: UserId = 1001;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            price: 100.0 * id as f64,
            purchased: false,
            link: String::new(),
        }
    }

    fn sessions() -> ProductSessions {
        ProductSessions::new(&CacheConfig {
            ttl: Duration::from_secs(600),
            sweep_interval: Duration::from_secs(3600),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_at_resolves_index() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A"), product(2, "B")]);

        assert_eq!(sessions.product_at(USER, "1").unwrap().name, "B");
        assert_eq!(sessions.product_at(USER, "0").unwrap().id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_at_out_of_range() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);

        assert_eq!(sessions.product_at(USER, "1"), Err(CacheError::ProductNotFound));
        assert_eq!(sessions.product_at(USER, "-1"), Err(CacheError::ProductNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_at_invalid_index() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);

        assert_eq!(
            sessions.product_at(USER, "first"),
            Err(CacheError::InvalidIndex("first".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_at_after_expiry() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);

        tokio::time::advance(Duration::from_secs(600)).await;

        assert_eq!(sessions.product_at(USER, "0"), Err(CacheError::ProductNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_are_per_user() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);

        assert_eq!(sessions.product_at(USER + 1, "0"), Err(CacheError::ProductNotFound));

        sessions.forget(USER);
        assert!(sessions.products(USER).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_or_fetch_uses_cache() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);
        let calls = AtomicUsize::new(0);

        let products = sessions
            .load_or_fetch(USER, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(vec![product(9, "Upstream")])
            })
            .await
            .unwrap();

        assert_eq!(products[0].name, "A");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(sessions.stats().hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_or_fetch_refreshes_ttl() {
        let sessions = sessions();
        sessions.remember(USER, vec![product(1, "A")]);

        tokio::time::advance(Duration::from_secs(500)).await;
        sessions
            .load_or_fetch(USER, || async { Err::<Vec<Product>, _>("unreachable") })
            .await
            .unwrap();

        // Past the original deadline, inside the refreshed one
        tokio::time::advance(Duration::from_secs(200)).await;
        assert!(sessions.products(USER).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_or_fetch_on_miss() {
        let sessions = sessions();

        let products = sessions
            .load_or_fetch(USER, || async { Ok::<_, String>(vec![product(9, "Upstream")]) })
            .await
            .unwrap();

        assert_eq!(products[0].id, 9);
        assert_eq!(sessions.product_at(USER, "0").unwrap().name, "Upstream");
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_or_fetch_error_passes_through() {
        let sessions = sessions();

        let result = sessions
            .load_or_fetch(USER, || async { Err::<Vec<Product>, _>("upstream down") })
            .await;

        assert_eq!(result.unwrap_err(), "upstream down");
        assert!(sessions.products(USER).is_none());
    }
}
