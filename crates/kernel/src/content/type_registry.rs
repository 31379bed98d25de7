//! Content type registry.
//!
//! Holds the content kinds and taxonomies the sitemap generator knows
//! about. Registration is explicit: the registry is filled from the
//! content store at startup, refreshed from every catalog snapshot the
//! generator loads, and passed to the generator, never looked up from
//! process-wide state.

use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tracing::{debug, info};

use super::catalog::Catalog;
use super::store::ContentStore;
use crate::models::{ItemType, Taxonomy};

/// Registry of content kinds and taxonomies.
#[derive(Clone, Default)]
pub struct ContentTypeRegistry {
    inner: Arc<ContentTypeRegistryInner>,
}

#[derive(Default)]
struct ContentTypeRegistryInner {
    types: DashMap<String, ItemType>,
    taxonomies: DashMap<String, Taxonomy>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load kind and taxonomy definitions from a content store.
    pub async fn sync_from_store(&self, store: &dyn ContentStore) -> Result<()> {
        let types = store
            .item_types()
            .await
            .context("failed to load item types")?;
        let taxonomies = store
            .taxonomies()
            .await
            .context("failed to load taxonomies")?;

        self.replace(&types, &taxonomies);

        info!(
            item_types = self.len(),
            taxonomies = self.taxonomy_count(),
            "content types synced from store"
        );
        Ok(())
    }

    /// Match the registry to a catalog snapshot.
    ///
    /// Kinds and taxonomies missing from the snapshot are dropped.
    pub fn sync_from_catalog(&self, catalog: &Catalog) {
        self.replace(&catalog.item_types, &catalog.taxonomies);

        debug!(
            item_types = self.len(),
            taxonomies = self.taxonomy_count(),
            "content types synced from catalog"
        );
    }

    fn replace(&self, types: &[ItemType], taxonomies: &[Taxonomy]) {
        for item_type in types {
            self.register_type(item_type.clone());
        }
        for taxonomy in taxonomies {
            self.register_taxonomy(taxonomy.clone());
        }

        self.inner
            .types
            .retain(|name, _| types.iter().any(|t| &t.type_name == name));
        self.inner
            .taxonomies
            .retain(|name, _| taxonomies.iter().any(|t| &t.name == name));
    }

    /// Register (or replace) a content kind.
    pub fn register_type(&self, item_type: ItemType) {
        self.inner
            .types
            .insert(item_type.type_name.clone(), item_type);
    }

    /// Register (or replace) a taxonomy.
    pub fn register_taxonomy(&self, taxonomy: Taxonomy) {
        self.inner
            .taxonomies
            .insert(taxonomy.name.clone(), taxonomy);
    }

    /// All content kinds ordered by weight, then name.
    pub fn list(&self) -> Vec<ItemType> {
        let mut types: Vec<ItemType> = self.inner.types.iter().map(|r| r.value().clone()).collect();
        types.sort_by(|a, b| (a.weight, &a.type_name).cmp(&(b.weight, &b.type_name)));
        types
    }

    /// All taxonomies ordered by weight, then name.
    pub fn list_taxonomies(&self) -> Vec<Taxonomy> {
        let mut taxonomies: Vec<Taxonomy> = self
            .inner
            .taxonomies
            .iter()
            .map(|r| r.value().clone())
            .collect();
        taxonomies.sort_by(|a, b| (a.weight, &a.name).cmp(&(b.weight, &b.name)));
        taxonomies
    }

    /// Check if a content kind exists.
    pub fn exists(&self, type_name: &str) -> bool {
        self.inner.types.contains_key(type_name)
    }

    /// Check if a taxonomy exists.
    pub fn taxonomy_exists(&self, name: &str) -> bool {
        self.inner.taxonomies.contains_key(name)
    }

    /// Number of registered content kinds.
    pub fn len(&self) -> usize {
        self.inner.types.len()
    }

    /// Check if no content kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.types.is_empty()
    }

    /// Number of registered taxonomies.
    pub fn taxonomy_count(&self) -> usize {
        self.inner.taxonomies.len()
    }
}
