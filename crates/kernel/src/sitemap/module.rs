//! Sitemap module names.
//!
//! Every sitemap document has a module name that is also its file name:
//! `sitemapindex`, `post` for the "post" kind, `post_<kind>` for other
//! kinds and `taxonomy_<taxonomy>` for taxonomy listings.

use std::fmt;

/// Module name of the sitemap index.
pub const INDEX_MODULE: &str = "sitemapindex";

const POST_TYPE_DEFAULT: &str = "post";
const POST_TYPE_PREFIX: &str = "post_";
const TAXONOMY_PREFIX: &str = "taxonomy_";

/// One sitemap document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SitemapModule {
    /// The sitemap index.
    Index,

    /// Items of one content kind.
    PostType(String),

    /// Terms of one taxonomy.
    Taxonomy(String),
}

impl SitemapModule {
    /// Parse a module name, with or without the `.xml` suffix.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.strip_suffix(".xml").unwrap_or(name);

        if name == INDEX_MODULE {
            return Some(Self::Index);
        }
        if name == POST_TYPE_DEFAULT {
            return Some(Self::PostType(POST_TYPE_DEFAULT.to_string()));
        }
        // "post" only has the bare name; `post_post` is not an alias.
        if let Some(kind) = name.strip_prefix(POST_TYPE_PREFIX) {
            return (!kind.is_empty() && kind != POST_TYPE_DEFAULT)
                .then(|| Self::PostType(kind.to_string()));
        }
        if let Some(taxonomy) = name.strip_prefix(TAXONOMY_PREFIX) {
            return (!taxonomy.is_empty()).then(|| Self::Taxonomy(taxonomy.to_string()));
        }
        None
    }

    pub fn for_item_type(item_type: &str) -> Self {
        Self::PostType(item_type.to_string())
    }

    pub fn for_taxonomy(taxonomy: &str) -> Self {
        Self::Taxonomy(taxonomy.to_string())
    }

    /// Module name, without suffix.
    pub fn name(&self) -> String {
        match self {
            Self::Index => INDEX_MODULE.to_string(),
            Self::PostType(kind) if kind == POST_TYPE_DEFAULT => POST_TYPE_DEFAULT.to_string(),
            Self::PostType(kind) => format!("{POST_TYPE_PREFIX}{kind}"),
            Self::Taxonomy(taxonomy) => format!("{TAXONOMY_PREFIX}{taxonomy}"),
        }
    }

    /// Public URL of this module under a site URL.
    pub fn url(&self, site_url: &str) -> String {
        format!("{}/{}.xml", site_url.trim_end_matches('/'), self.name())
    }
}

impl fmt::Display for SitemapModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
