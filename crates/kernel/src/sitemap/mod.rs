//! Sitemap generation.
//!
//! This module provides:
//! - SitemapModule: naming of the index and per-kind / per-taxonomy sitemaps
//! - GeneratorSettings: typed generator options
//! - UrlSetWriter / SitemapIndexWriter: XML serialization
//! - SitemapGenerator: reads content and options, applies exclusions, renders

mod error;
mod generator;
mod module;
mod settings;
mod writer;

pub use error::SitemapError;
pub use generator::{ItemReport, RenderedSitemap, SitemapGenerator};
pub use module::{INDEX_MODULE, SitemapModule};
pub use settings::{ChangeFreq, GeneratorSettings, MAX_URLS_PER_SITEMAP};
pub use writer::{SITEMAP_NAMESPACE, SitemapEntry, SitemapIndexWriter, UrlEntry, UrlSetWriter};
