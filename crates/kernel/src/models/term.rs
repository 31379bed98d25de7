//! Taxonomy term model.

use serde::{Deserialize, Serialize};

/// A term within a taxonomy (a category, a tag, a genre).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Unique identifier.
    pub id: i64,

    /// Taxonomy this term belongs to.
    pub taxonomy: String,

    /// URL slug, unique within the taxonomy.
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Unix timestamp when last changed.
    #[serde(default)]
    pub changed: i64,
}

impl Term {
    pub fn new(id: i64, taxonomy: impl Into<String>, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id,
            taxonomy: taxonomy.into(),
            name: slug.clone(),
            slug,
            changed: 0,
        }
    }
}
