//! Registered content kinds.

use serde::{Deserialize, Serialize};

/// Content kind definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    /// Machine name (e.g., "post", "page", "movie").
    #[serde(rename = "type")]
    pub type_name: String,

    /// Human-readable label.
    #[serde(default)]
    pub label: String,

    /// Sort weight in the sitemap index.
    #[serde(default)]
    pub weight: i16,
}

impl ItemType {
    pub fn new(type_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            weight: 0,
        }
    }

    /// Set the sort weight.
    pub fn with_weight(mut self, weight: i16) -> Self {
        self.weight = weight;
        self
    }
}
