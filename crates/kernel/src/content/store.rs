//! Content store abstraction.
//!
//! The sitemap generator reads content only through [`ContentStore`].
//! Two implementations ship with the kernel:
//!
//! - [`MemoryContentStore`]: mutable in-process catalog, used by tests and
//!   by the fixture factory.
//! - [`YamlContentStore`]: a YAML content file, re-read on every call so
//!   edits show up on the next render.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::catalog::Catalog;
use crate::models::{ContentItem, ItemType, Taxonomy, Term};

/// Read access to site content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Registered content kinds.
    async fn item_types(&self) -> Result<Vec<ItemType>>;

    /// Registered taxonomies.
    async fn taxonomies(&self) -> Result<Vec<Taxonomy>>;

    /// All content items.
    async fn items(&self) -> Result<Vec<ContentItem>>;

    /// All taxonomy terms.
    async fn terms(&self) -> Result<Vec<Term>>;

    /// Full snapshot of the store.
    async fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog {
            item_types: self.item_types().await?,
            taxonomies: self.taxonomies().await?,
            terms: self.terms().await?,
            items: self.items().await?,
        })
    }
}

/// In-memory content store.
#[derive(Default)]
pub struct MemoryContentStore {
    catalog: RwLock<Catalog>,
}

impl MemoryContentStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Register a content kind.
    pub fn register_type(&self, item_type: ItemType) {
        let mut catalog = self.catalog.write();
        catalog.item_types.retain(|t| t.type_name != item_type.type_name);
        catalog.item_types.push(item_type);
    }

    /// Register a taxonomy.
    pub fn register_taxonomy(&self, taxonomy: Taxonomy) {
        let mut catalog = self.catalog.write();
        catalog.taxonomies.retain(|t| t.name != taxonomy.name);
        catalog.taxonomies.push(taxonomy);
    }

    /// Insert or replace an item.
    pub fn insert_item(&self, item: ContentItem) {
        let mut catalog = self.catalog.write();
        match catalog.items.iter().position(|i| i.id == item.id) {
            Some(pos) => catalog.items[pos] = item,
            None => catalog.items.push(item),
        }
    }

    /// Insert or replace a term.
    pub fn insert_term(&self, term: Term) {
        let mut catalog = self.catalog.write();
        let existing = catalog
            .terms
            .iter()
            .position(|t| t.id == term.id && t.taxonomy == term.taxonomy);
        match existing {
            Some(pos) => catalog.terms[pos] = term,
            None => catalog.terms.push(term),
        }
    }

    /// Attach terms to an existing item. Returns `false` if the item is unknown.
    pub fn add_item_terms(&self, item_id: i64, taxonomy: &str, term_ids: &[i64]) -> bool {
        let mut catalog = self.catalog.write();
        let Some(item) = catalog.item_mut(item_id) else {
            return false;
        };
        item.add_terms(taxonomy, term_ids);
        true
    }

    /// Next free item ID.
    pub fn next_item_id(&self) -> i64 {
        self.catalog.read().next_item_id()
    }

    /// Next free term ID.
    pub fn next_term_id(&self) -> i64 {
        self.catalog.read().next_term_id()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn item_types(&self) -> Result<Vec<ItemType>> {
        Ok(self.catalog.read().item_types.clone())
    }

    async fn taxonomies(&self) -> Result<Vec<Taxonomy>> {
        Ok(self.catalog.read().taxonomies.clone())
    }

    async fn items(&self) -> Result<Vec<ContentItem>> {
        Ok(self.catalog.read().items.clone())
    }

    async fn terms(&self) -> Result<Vec<Term>> {
        Ok(self.catalog.read().terms.clone())
    }

    async fn catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.read().clone())
    }
}

/// Content store backed by a YAML file.
pub struct YamlContentStore {
    path: PathBuf,
}

impl YamlContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Catalog> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read content file {}", self.path.display()))?;
        let catalog: Catalog = serde_yml::from_str(&contents)
            .with_context(|| format!("failed to parse content file {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            items = catalog.items.len(),
            terms = catalog.terms.len(),
            "content file loaded"
        );
        Ok(catalog)
    }
}

#[async_trait]
impl ContentStore for YamlContentStore {
    async fn item_types(&self) -> Result<Vec<ItemType>> {
        Ok(self.read().await?.item_types)
    }

    async fn taxonomies(&self) -> Result<Vec<Taxonomy>> {
        Ok(self.read().await?.taxonomies)
    }

    async fn items(&self) -> Result<Vec<ContentItem>> {
        Ok(self.read().await?.items)
    }

    async fn terms(&self) -> Result<Vec<Term>> {
        Ok(self.read().await?.terms)
    }

    async fn catalog(&self) -> Result<Catalog> {
        self.read().await
    }
}
