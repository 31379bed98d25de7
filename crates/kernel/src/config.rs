//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::DEFAULT_TTL_SECS;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Public site URL used in `<loc>` entries, without trailing slash.
    pub site_url: String,

    /// Path to the YAML content file (default: ./content.yml).
    pub content_path: PathBuf,

    /// Path to the YAML options file (default: ./options.yml).
    pub options_path: PathBuf,

    /// Lifetime of cached sitemap documents (default: 3600 seconds).
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let site_url = env::var("SITE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let content_path = env::var("CONTENT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./content.yml"));

        let options_path = env::var("OPTIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./options.yml"));

        let cache_ttl_secs: u64 = env::var("SITEMAP_CACHE_TTL")
            .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
            .parse()
            .context("SITEMAP_CACHE_TTL must be a number of seconds")?;

        Ok(Self {
            port,
            site_url,
            content_path,
            options_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}
