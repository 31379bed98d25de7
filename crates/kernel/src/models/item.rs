//! Content item model.
//!
//! Items are the content records listed in per-kind sitemaps (posts,
//! pages, custom kinds like "movie").

use serde::{Deserialize, Serialize};

/// Publication status value for published items.
pub const STATUS_PUBLISHED: i16 = 1;

/// Content item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier.
    pub id: i64,

    /// Content kind machine name (e.g. "post", "movie").
    #[serde(rename = "type")]
    pub item_type: String,

    /// URL slug.
    #[serde(default)]
    pub slug: String,

    /// Item title.
    #[serde(default)]
    pub title: String,

    /// Publication status (0 = unpublished, 1 = published).
    #[serde(default = "default_status")]
    pub status: i16,

    /// Unix timestamp when last changed.
    #[serde(default)]
    pub changed: i64,

    /// Associated terms, in assignment order.
    #[serde(default)]
    pub terms: Vec<TermRef>,
}

fn default_status() -> i16 {
    STATUS_PUBLISHED
}

/// Reference from an item to a term within a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermRef {
    /// Taxonomy machine name.
    pub taxonomy: String,

    /// Term identifier.
    pub id: i64,
}

impl TermRef {
    pub fn new(taxonomy: impl Into<String>, id: i64) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            id,
        }
    }
}

impl ContentItem {
    /// Create a published item with no terms.
    pub fn new(id: i64, item_type: impl Into<String>) -> Self {
        Self {
            id,
            item_type: item_type.into(),
            slug: format!("item-{id}"),
            title: String::new(),
            status: STATUS_PUBLISHED,
            changed: 0,
            terms: Vec::new(),
        }
    }

    /// Check if this item is published.
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    /// Term references belonging to one taxonomy.
    pub fn terms_in<'a>(&'a self, taxonomy: &'a str) -> impl Iterator<Item = &'a TermRef> + 'a {
        self.terms.iter().filter(move |t| t.taxonomy == taxonomy)
    }

    /// Attach terms of a taxonomy, skipping ones already attached.
    pub fn add_terms(&mut self, taxonomy: &str, ids: &[i64]) {
        for &id in ids {
            let term = TermRef::new(taxonomy, id);
            if !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
    }
}
