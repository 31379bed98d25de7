//! Registered taxonomies.

use serde::{Deserialize, Serialize};

/// Taxonomy definition (e.g. "category", "post_tag", "genre").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Machine name.
    pub name: String,

    /// Human-readable label.
    #[serde(default)]
    pub label: String,

    /// Sort weight in the sitemap index.
    #[serde(default)]
    pub weight: i16,

    /// Content kinds this taxonomy classifies.
    #[serde(default)]
    pub object_types: Vec<String>,
}

impl Taxonomy {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            weight: 0,
            object_types: Vec::new(),
        }
    }

    /// Attach this taxonomy to a content kind.
    pub fn for_type(mut self, item_type: impl Into<String>) -> Self {
        self.object_types.push(item_type.into());
        self
    }
}
