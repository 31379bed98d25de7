//! Content catalog snapshot.
//!
//! A catalog is what the content store hands to the sitemap generator for
//! one render: every item and every term, plus the registered kinds and
//! taxonomies. The YAML content file has the same shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ContentItem, ItemType, Taxonomy, Term};

/// Snapshot of the content store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub item_types: Vec<ItemType>,

    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,

    #[serde(default)]
    pub terms: Vec<Term>,

    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of one content kind, in catalog order.
    pub fn items_of<'a>(&'a self, item_type: &'a str) -> impl Iterator<Item = &'a ContentItem> + 'a {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    /// Terms of one taxonomy, in catalog order.
    pub fn terms_of<'a>(&'a self, taxonomy: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.terms.iter().filter(move |t| t.taxonomy == taxonomy)
    }

    /// Find an item by ID for mutation.
    pub fn item_mut(&mut self, id: i64) -> Option<&mut ContentItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Next free item ID (IDs are shared across kinds).
    pub fn next_item_id(&self) -> i64 {
        self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    /// Next free term ID (IDs are shared across taxonomies).
    pub fn next_term_id(&self) -> i64 {
        self.terms.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

/// Lookup from `(taxonomy, id)` to term.
#[derive(Debug, Default)]
pub struct TermIndex<'a> {
    by_key: HashMap<(&'a str, i64), &'a Term>,
}

impl<'a> TermIndex<'a> {
    pub fn new(terms: &'a [Term]) -> Self {
        let by_key = terms
            .iter()
            .map(|t| ((t.taxonomy.as_str(), t.id), t))
            .collect();
        Self { by_key }
    }

    pub fn get(&self, taxonomy: &str, id: i64) -> Option<&'a Term> {
        self.by_key.get(&(taxonomy, id)).copied()
    }
}
