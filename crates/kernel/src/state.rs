//! Application state shared across all handlers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::SitemapCache;
use crate::config::Config;
use crate::content::{ContentStore, ContentTypeRegistry, YamlContentStore};
use crate::option_storage::{OptionStorage, YamlOptionStorage};
use crate::sitemap::SitemapGenerator;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Content source for every render.
    content: Arc<dyn ContentStore>,

    /// Sitemap generator.
    sitemaps: SitemapGenerator,
}

impl AppState {
    /// Build state from YAML content and options files.
    pub async fn new(config: &Config) -> Self {
        let content: Arc<dyn ContentStore> =
            Arc::new(YamlContentStore::new(&config.content_path));
        let options: Arc<dyn OptionStorage> =
            Arc::new(YamlOptionStorage::new(&config.options_path));

        let cache = SitemapCache::new(config.cache_ttl);

        let state = Self::from_parts(content, options, cache, &config.site_url).await;

        info!(
            content = %config.content_path.display(),
            options = %config.options_path.display(),
            "stores opened"
        );
        state
    }

    /// Build state from explicit stores.
    ///
    /// The content type registry is seeded from the content store here and
    /// refreshed on every render. An unreadable store starts it empty.
    pub async fn from_parts(
        content: Arc<dyn ContentStore>,
        options: Arc<dyn OptionStorage>,
        cache: SitemapCache,
        site_url: &str,
    ) -> Self {
        let registry = ContentTypeRegistry::new();
        if let Err(e) = registry.sync_from_store(content.as_ref()).await {
            warn!(error = %e, "content store unavailable, starting with no content kinds");
        }

        let sitemaps =
            SitemapGenerator::new(registry, content.clone(), options, cache, site_url);

        Self {
            inner: Arc::new(AppStateInner {
                content,
                sitemaps,
            }),
        }
    }

    /// Get the sitemap generator.
    pub fn sitemaps(&self) -> &SitemapGenerator {
        &self.inner.sitemaps
    }

    /// Get the content type registry.
    pub fn content_types(&self) -> &ContentTypeRegistry {
        self.inner.sitemaps.registry()
    }

    /// Check that the content store answers.
    pub async fn content_healthy(&self) -> bool {
        self.inner.content.item_types().await.is_ok()
    }
}
