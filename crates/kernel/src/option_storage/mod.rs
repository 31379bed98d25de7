//! Option storage abstraction layer.
//!
//! Site options are a flat bag of JSON values keyed by name. The sitemap
//! kernel reads its settings and exclusion lists from here; nothing outside
//! [`crate::exclusion::RulesDecoder`] and [`crate::sitemap::GeneratorSettings`]
//! interprets the values.
//!
//! # Usage
//!
//! ```ignore
//! let generator = storage.load(option_keys::GENERATOR).await?;
//! merge_options(&storage, option_keys::GENERATOR, json!({"enable_cache": "yes"})).await?;
//! ```

mod memory;
pub mod yaml;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use memory::MemoryOptionStorage;
pub use yaml::YamlOptionStorage;

/// Key/value option storage.
#[async_trait]
pub trait OptionStorage: Send + Sync {
    /// Load an option. Returns `None` if it was never saved.
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Save an option (insert or replace).
    async fn save(&self, key: &str, value: &Value) -> Result<()>;

    /// Delete an option. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// All stored option names, sorted.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Check if an option exists.
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.load(key).await?.is_some())
    }
}

/// Option names used by the sitemap generator.
pub mod option_keys {
    /// Generator settings object (`input_exclude_post_type`, `enable_cache`, ...).
    pub const GENERATOR: &str = "sitemap_generator";

    /// Excluded item IDs: object of content kind to comma list.
    pub const EXCLUDED_POSTS: &str = "sitemap_excluded_posts";

    /// Excluded terms: object of taxonomy to comma list of IDs or slugs.
    pub const EXCLUDED_TERMS: &str = "sitemap_excluded_terms";

    /// "yes" to read excluded terms as slugs instead of IDs.
    pub const EXCLUDE_TERMS_BY_SLUGS: &str = "sitemap_generator_exclude_terms_by_slugs";
}

/// Merge fields into an object-valued option, creating it if missing.
///
/// A stored value that is not an object is replaced.
pub async fn merge_options(storage: &dyn OptionStorage, key: &str, patch: Value) -> Result<()> {
    let mut current = match storage.load(key).await? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    if let Value::Object(patch) = patch {
        for (field, value) in patch {
            current.insert(field, value);
        }
    }

    storage.save(key, &Value::Object(current)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn merge_keeps_existing_fields() {
        let storage = MemoryOptionStorage::new();
        storage
            .save(
                option_keys::GENERATOR,
                &json!({"input_exclude_post_type": "", "enable_cache": ""}),
            )
            .await
            .unwrap();

        merge_options(
            &storage,
            option_keys::GENERATOR,
            json!({"input_exclude_post_type": "movie"}),
        )
        .await
        .unwrap();

        let value = storage.load(option_keys::GENERATOR).await.unwrap().unwrap();
        assert_eq!(value["input_exclude_post_type"], "movie");
        assert_eq!(value["enable_cache"], "");
    }

    #[tokio::test]
    async fn merge_replaces_non_object_value() {
        let storage = MemoryOptionStorage::new();
        storage.save("odd", &json!("scalar")).await.unwrap();

        merge_options(&storage, "odd", json!({"a": 1})).await.unwrap();

        assert_eq!(storage.load("odd").await.unwrap(), Some(json!({"a": 1})));
    }
}
