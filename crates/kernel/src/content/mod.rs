//! Content module.
//!
//! This module provides:
//! - ContentTypeRegistry: explicitly registered content kinds and taxonomies
//! - Catalog: a snapshot of items and terms for one render
//! - ContentStore: read access to content (in-memory and YAML-backed)

mod catalog;
mod store;
mod type_registry;

pub use catalog::{Catalog, TermIndex};
pub use store::{ContentStore, MemoryContentStore, YamlContentStore};
pub use type_registry::ContentTypeRegistry;
