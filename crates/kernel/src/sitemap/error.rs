//! Sitemap error types.

use thiserror::Error;

/// Errors returned when a sitemap module can't be served.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SitemapError {
    /// Module name doesn't map to a registered kind or taxonomy.
    #[error("unknown sitemap module '{0}'")]
    UnknownModule(String),

    /// Module exists but is excluded or switched off.
    #[error("sitemap module '{0}' is disabled")]
    ModuleDisabled(String),
}
