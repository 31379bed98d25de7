//! Sitemap kernel library.
//!
//! Content and option stores, exclusion rules and the sitemap generator.
//! The `sitemapd` binary serves the generated documents over HTTP.

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod exclusion;
pub mod models;
pub mod option_storage;
pub mod routes;
pub mod sitemap;
pub mod state;

pub use config::Config;
pub use content::{ContentStore, ContentTypeRegistry};
pub use exclusion::{ExclusionRules, resolve, resolve_terms};
pub use option_storage::OptionStorage;
pub use sitemap::SitemapGenerator;
pub use state::AppState;
