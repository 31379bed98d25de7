//! Sitemap kernel test utilities.
//!
//! A fixture factory over in-memory stores: create items and terms with
//! sequential IDs, attach terms to items, and set options the way the
//! admin screens would.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use sitemap_kernel::content::MemoryContentStore;
use sitemap_kernel::models::{ContentItem, ItemType, Taxonomy, Term};
use sitemap_kernel::option_storage::{
    MemoryOptionStorage, OptionStorage, merge_options, option_keys,
};

/// Number of items or terms created when no count is given.
pub const DEFAULT_FIXTURE_COUNT: usize = 5;

/// Base "changed" timestamp for fixtures (2024-01-01T00:00:00Z).
const BASE_TIMESTAMP: i64 = 1_704_067_200;

/// In-memory content and options, pre-registered with the usual kinds and
/// taxonomies: `post`, `page`, `movie`; `category`, `post_tag`, `genre`.
pub struct Fixtures {
    pub content: Arc<MemoryContentStore>,
    pub options: Arc<MemoryOptionStorage>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixtures {
    pub fn new() -> Self {
        let content = MemoryContentStore::default();
        content.register_type(ItemType::new("post", "Posts").with_weight(-10));
        content.register_type(ItemType::new("page", "Pages").with_weight(-5));
        content.register_type(ItemType::new("movie", "Movies"));
        content.register_taxonomy(Taxonomy::new("category", "Categories").for_type("post"));
        content.register_taxonomy(Taxonomy::new("post_tag", "Tags").for_type("post"));
        content.register_taxonomy(Taxonomy::new("genre", "Genres").for_type("movie"));

        Self {
            content: Arc::new(content),
            options: Arc::new(MemoryOptionStorage::new()),
        }
    }

    /// Create `count` published items of a kind. Returns their IDs.
    ///
    /// IDs are shared across kinds, so five posts then five movies get
    /// IDs 1-5 and 6-10.
    pub fn create_posts(&self, item_type: &str, count: usize) -> Vec<i64> {
        (0..count)
            .map(|_| {
                let id = self.content.next_item_id();
                let mut item = ContentItem::new(id, item_type);
                item.slug = format!("{item_type}-{id}");
                item.title = format!("{item_type} {id}");
                item.changed = BASE_TIMESTAMP + id;
                self.content.insert_item(item);
                id
            })
            .collect()
    }

    /// Create `count` terms in a taxonomy with slugs `{taxonomy}-{id}`.
    pub fn create_terms(&self, taxonomy: &str, count: usize) -> Vec<i64> {
        (0..count)
            .map(|_| {
                let id = self.content.next_term_id();
                let mut term = Term::new(id, taxonomy, format!("{taxonomy}-{id}"));
                term.changed = BASE_TIMESTAMP + id;
                self.content.insert_term(term);
                id
            })
            .collect()
    }

    /// Attach terms of a taxonomy to an item.
    ///
    /// Term IDs don't have to exist in the catalog.
    pub fn add_post_terms(&self, item_id: i64, term_ids: &[i64], taxonomy: &str) {
        let attached = self.content.add_item_terms(item_id, taxonomy, term_ids);
        assert!(attached, "no item with id {item_id}");
    }

    /// Replace an option value.
    pub async fn update_option(&self, key: &str, value: JsonValue) {
        self.options
            .save(key, &value)
            .await
            .unwrap_or_else(|e| panic!("failed to save option {key}: {e}"));
    }

    /// Merge fields into an object option.
    pub async fn set_options(&self, key: &str, patch: JsonValue) {
        merge_options(self.options.as_ref(), key, patch)
            .await
            .unwrap_or_else(|e| panic!("failed to merge option {key}: {e}"));
    }

    /// Reset generator options to plugin defaults: nothing excluded,
    /// taxonomy sitemaps on, cache off, exclusion lists empty.
    pub async fn set_default_options(&self) {
        self.update_option(
            option_keys::GENERATOR,
            serde_json::json!({
                "input_exclude_post_type": "",
                "input_exclude_taxonomy": "",
                "enable_sitemap_taxonomy": "yes",
                "enable_cache": "",
            }),
        )
        .await;
        self.update_option(option_keys::EXCLUDED_POSTS, serde_json::json!({}))
            .await;
        self.update_option(option_keys::EXCLUDED_TERMS, serde_json::json!({}))
            .await;
        self.update_option(option_keys::EXCLUDE_TERMS_BY_SLUGS, serde_json::json!(""))
            .await;
    }

    /// Five posts, five movies, five categories, five genres; the first
    /// post carries every category and the first movie every genre.
    ///
    /// Returns `(posts, movies, categories, genres)`.
    pub fn prepare_taxonomy_fixture(&self) -> (Vec<i64>, Vec<i64>, Vec<i64>, Vec<i64>) {
        let posts = self.create_posts("post", DEFAULT_FIXTURE_COUNT);
        let movies = self.create_posts("movie", DEFAULT_FIXTURE_COUNT);
        let categories = self.create_terms("category", DEFAULT_FIXTURE_COUNT);
        let genres = self.create_terms("genre", DEFAULT_FIXTURE_COUNT);

        self.add_post_terms(posts[0], &categories, "category");
        self.add_post_terms(movies[0], &genres, "genre");

        (posts, movies, categories, genres)
    }
}
