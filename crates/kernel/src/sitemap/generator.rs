//! Sitemap generator.
//!
//! Every render re-reads the option store, decodes a fresh rule set and
//! pulls a catalog snapshot from the content store. Each snapshot also
//! refreshes the kind and taxonomy registry, so kinds added to the store
//! are served without a restart. A content store failure keeps the last
//! known registry and renders an empty document so crawlers always get
//! valid XML.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::error::SitemapError;
use super::module::SitemapModule;
use super::settings::GeneratorSettings;
use super::writer::{SitemapEntry, SitemapIndexWriter, UrlEntry, UrlSetWriter};
use crate::cache::SitemapCache;
use crate::content::{Catalog, ContentStore, ContentTypeRegistry, TermIndex};
use crate::exclusion::{
    ExclusionReason, ExclusionRules, RawOptions, RulesDecoder, item_exclusion, resolve,
    resolve_terms,
};
use crate::models::{ContentItem, Term};
use crate::option_storage::OptionStorage;

/// A rendered sitemap document.
#[derive(Debug, Clone)]
pub struct RenderedSitemap {
    /// Module name (`sitemapindex`, `post`, `taxonomy_genre`, ...).
    pub module: String,

    /// XML document.
    pub xml: String,

    /// Number of `<url>` or `<sitemap>` entries.
    pub url_count: usize,
}

/// Exclusion status of one catalog item.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub id: i64,
    pub item_type: String,
    pub slug: String,
    pub published: bool,
    pub excluded: Option<ExclusionReason>,
}

/// Options decoded for one render.
struct RenderContext {
    rules: ExclusionRules,
    settings: GeneratorSettings,
}

/// Renders the sitemap index and module sitemaps.
#[derive(Clone)]
pub struct SitemapGenerator {
    inner: Arc<SitemapGeneratorInner>,
}

struct SitemapGeneratorInner {
    registry: ContentTypeRegistry,
    content: Arc<dyn ContentStore>,
    options: Arc<dyn OptionStorage>,
    cache: SitemapCache,
    site_url: String,
}

impl SitemapGenerator {
    pub fn new(
        registry: ContentTypeRegistry,
        content: Arc<dyn ContentStore>,
        options: Arc<dyn OptionStorage>,
        cache: SitemapCache,
        site_url: &str,
    ) -> Self {
        Self {
            inner: Arc::new(SitemapGeneratorInner {
                registry,
                content,
                options,
                cache,
                site_url: site_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    pub fn registry(&self) -> &ContentTypeRegistry {
        &self.inner.registry
    }

    pub fn cache(&self) -> &SitemapCache {
        &self.inner.cache
    }

    /// Public URL of a module.
    pub fn module_url(&self, module: &SitemapModule) -> String {
        module.url(&self.inner.site_url)
    }

    /// Public URL of the sitemap index.
    pub fn index_url(&self) -> String {
        self.module_url(&SitemapModule::Index)
    }

    /// Public URL of an item.
    ///
    /// "post" items live at the site root, other kinds under `/{kind}/`.
    /// Items without a slug fall back to `/?p={id}`.
    pub fn item_url(&self, item: &ContentItem) -> String {
        let site = &self.inner.site_url;
        if item.slug.is_empty() {
            return format!("{site}/?p={}", item.id);
        }
        let slug = urlencoding::encode(&item.slug);
        if item.item_type == "post" {
            format!("{site}/{slug}")
        } else {
            format!("{site}/{}/{slug}", urlencoding::encode(&item.item_type))
        }
    }

    /// Public URL of a term listing.
    pub fn term_url(&self, term: &Term) -> String {
        format!(
            "{}/{}/{}",
            self.inner.site_url,
            urlencoding::encode(&term.taxonomy),
            urlencoding::encode(&term.slug)
        )
    }

    /// Render a module by name (`post`, `post_movie.xml`, `sitemapindex`, ...).
    pub async fn render(&self, name: &str) -> Result<RenderedSitemap, SitemapError> {
        let module =
            SitemapModule::parse(name).ok_or_else(|| SitemapError::UnknownModule(name.to_string()))?;
        self.render_module(&module).await
    }

    /// Render a parsed module.
    pub async fn render_module(
        &self,
        module: &SitemapModule,
    ) -> Result<RenderedSitemap, SitemapError> {
        let ctx = self.load_context().await;
        let catalog = self.load_catalog().await;
        self.check_module(module, &ctx)?;

        let name = module.name();
        if ctx.settings.enable_cache {
            if let Some(hit) = self.inner.cache.get(&name).await {
                return Ok(hit);
            }
        }

        let (xml, url_count) = match module {
            SitemapModule::Index => self.build_index(&catalog, &ctx),
            SitemapModule::PostType(kind) => self.build_post_type(&catalog, &ctx, kind),
            SitemapModule::Taxonomy(taxonomy) => self.build_taxonomy(&catalog, &ctx, taxonomy),
        };

        info!(module = %name, urls = url_count, "sitemap rendered");

        let rendered = RenderedSitemap {
            module: name,
            xml,
            url_count,
        };
        if ctx.settings.enable_cache {
            self.inner.cache.insert(rendered.clone()).await;
        }
        Ok(rendered)
    }

    /// Report the exclusion status of every catalog item.
    pub async fn inspect(&self) -> Vec<ItemReport> {
        let ctx = self.load_context().await;
        let catalog = self.load_catalog().await;
        let index = TermIndex::new(&catalog.terms);

        catalog
            .items
            .iter()
            .map(|item| ItemReport {
                id: item.id,
                item_type: item.item_type.clone(),
                slug: item.slug.clone(),
                published: item.is_published(),
                excluded: item_exclusion(item, &index, &ctx.rules),
            })
            .collect()
    }

    async fn load_context(&self) -> RenderContext {
        let raw = RawOptions::load_or_default(self.inner.options.as_ref()).await;

        RenderContext {
            rules: RulesDecoder::decode(&raw),
            settings: GeneratorSettings::from_raw(&raw),
        }
    }

    async fn load_catalog(&self) -> Catalog {
        match self.inner.content.catalog().await {
            Ok(catalog) => {
                self.inner.registry.sync_from_catalog(&catalog);
                catalog
            }
            Err(e) => {
                warn!(error = %e, "failed to load content, rendering empty sitemap");
                Catalog::default()
            }
        }
    }

    fn check_module(&self, module: &SitemapModule, ctx: &RenderContext) -> Result<(), SitemapError> {
        match module {
            SitemapModule::Index => Ok(()),
            SitemapModule::PostType(kind) => {
                if !self.inner.registry.exists(kind) {
                    return Err(SitemapError::UnknownModule(module.name()));
                }
                if ctx.rules.is_post_type_excluded(kind) {
                    return Err(SitemapError::ModuleDisabled(module.name()));
                }
                Ok(())
            }
            SitemapModule::Taxonomy(taxonomy) => {
                if !self.inner.registry.taxonomy_exists(taxonomy) {
                    return Err(SitemapError::UnknownModule(module.name()));
                }
                if !ctx.settings.enable_sitemap_taxonomy
                    || ctx.rules.is_taxonomy_excluded(taxonomy)
                {
                    return Err(SitemapError::ModuleDisabled(module.name()));
                }
                Ok(())
            }
        }
    }

    /// Eligible published items of one kind, newest first, capped at the item limit.
    fn eligible_items(
        &self,
        catalog: &Catalog,
        ctx: &RenderContext,
        kind: &str,
    ) -> Vec<ContentItem> {
        let candidates: Vec<ContentItem> = catalog
            .items_of(kind)
            .filter(|i| i.is_published())
            .cloned()
            .collect();

        let mut eligible = resolve(&candidates, &catalog.terms, &ctx.rules);
        eligible.sort_by(|a, b| b.changed.cmp(&a.changed));
        eligible.truncate(ctx.settings.item_limit);

        debug!(
            item_type = %kind,
            candidates = candidates.len(),
            eligible = eligible.len(),
            "items resolved"
        );
        eligible
    }

    /// Eligible terms of one taxonomy, capped at the item limit.
    fn eligible_terms(&self, catalog: &Catalog, ctx: &RenderContext, taxonomy: &str) -> Vec<Term> {
        let candidates: Vec<Term> = catalog.terms_of(taxonomy).cloned().collect();

        let mut eligible = resolve_terms(&candidates, &ctx.rules);
        eligible.truncate(ctx.settings.item_limit);
        eligible
    }

    fn build_index(&self, catalog: &Catalog, ctx: &RenderContext) -> (String, usize) {
        let mut writer = SitemapIndexWriter::new();

        for item_type in self.inner.registry.list() {
            if ctx.rules.is_post_type_excluded(&item_type.type_name) {
                continue;
            }
            let items = self.eligible_items(catalog, ctx, &item_type.type_name);
            if items.is_empty() {
                continue;
            }
            writer.add_sitemap(&SitemapEntry {
                loc: self.module_url(&SitemapModule::for_item_type(&item_type.type_name)),
                lastmod: newest(items.iter().map(|i| i.changed)),
            });
        }

        if ctx.settings.enable_sitemap_taxonomy {
            for taxonomy in self.inner.registry.list_taxonomies() {
                if ctx.rules.is_taxonomy_excluded(&taxonomy.name) {
                    continue;
                }
                let terms = self.eligible_terms(catalog, ctx, &taxonomy.name);
                if terms.is_empty() {
                    continue;
                }
                writer.add_sitemap(&SitemapEntry {
                    loc: self.module_url(&SitemapModule::for_taxonomy(&taxonomy.name)),
                    lastmod: newest(terms.iter().map(|t| t.changed)),
                });
            }
        }

        writer.finish()
    }

    fn build_post_type(&self, catalog: &Catalog, ctx: &RenderContext, kind: &str) -> (String, usize) {
        let mut writer = UrlSetWriter::new();

        for item in self.eligible_items(catalog, ctx, kind) {
            writer.add_url(&UrlEntry {
                loc: self.item_url(&item),
                lastmod: timestamp(item.changed),
                changefreq: Some(ctx.settings.default_freq),
                priority: Some(ctx.settings.default_priority),
            });
        }

        writer.finish()
    }

    fn build_taxonomy(
        &self,
        catalog: &Catalog,
        ctx: &RenderContext,
        taxonomy: &str,
    ) -> (String, usize) {
        let mut writer = UrlSetWriter::new();

        for term in self.eligible_terms(catalog, ctx, taxonomy) {
            writer.add_url(&UrlEntry {
                loc: self.term_url(&term),
                lastmod: timestamp(term.changed),
                changefreq: Some(ctx.settings.default_freq),
                priority: Some(ctx.settings.default_priority),
            });
        }

        writer.finish()
    }
}

/// Unset (zero) timestamps produce no `<lastmod>`.
fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    (secs > 0).then(|| DateTime::from_timestamp(secs, 0)).flatten()
}

fn newest(timestamps: impl Iterator<Item = i64>) -> Option<DateTime<Utc>> {
    timestamps.max().and_then(timestamp)
}
