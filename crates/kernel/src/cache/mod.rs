//! In-process cache of rendered sitemap documents.
//!
//! Only consulted when the `enable_cache` generator option is on. Entries
//! are keyed by module name and expire after a fixed TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::sitemap::RenderedSitemap;

/// Default TTL for cached documents (1 hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Maximum cached documents.
const MAX_CAPACITY: u64 = 1_000;

/// Cache of rendered sitemaps.
#[derive(Clone)]
pub struct SitemapCache {
    inner: Arc<Cache<String, RenderedSitemap>>,
}

impl Default for SitemapCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

impl SitemapCache {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self {
            inner: Arc::new(cache),
        }
    }

    /// Get a cached document.
    pub async fn get(&self, module: &str) -> Option<RenderedSitemap> {
        let hit = self.inner.get(module).await;
        if hit.is_some() {
            debug!(module = %module, "sitemap cache hit");
        }
        hit
    }

    /// Store a rendered document.
    pub async fn insert(&self, rendered: RenderedSitemap) {
        debug!(module = %rendered.module, "sitemap cached");
        self.inner.insert(rendered.module.clone(), rendered).await;
    }

    /// Drop every cached document.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        debug!("sitemap cache cleared");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn rendered(module: &str) -> RenderedSitemap {
        RenderedSitemap {
            module: module.to_string(),
            xml: "<urlset/>".to_string(),
            url_count: 0,
        }
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = SitemapCache::default();
        assert!(cache.get("post").await.is_none());

        cache.insert(rendered("post")).await;
        assert_eq!(cache.get("post").await.unwrap().module, "post");
        assert!(cache.get("post_movie").await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_clears_everything() {
        let cache = SitemapCache::default();
        cache.insert(rendered("post")).await;
        cache.insert(rendered("post_movie")).await;
        assert!(cache.get("post_movie").await.is_some());

        cache.invalidate_all();

        assert!(cache.get("post").await.is_none());
        assert!(cache.get("post_movie").await.is_none());
    }
}
