//! Sitemap XML writers.
//!
//! Both writers build the whole document in memory; sitemap documents are
//! capped at 50,000 entries so this stays small.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;

use super::settings::ChangeFreq;

/// XML namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl UrlEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// One `<sitemap>` entry of the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
}

/// Writes a `<urlset>` document.
pub struct UrlSetWriter {
    buf: String,
    url_count: usize,
}

impl Default for UrlSetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlSetWriter {
    pub fn new() -> Self {
        let mut buf = String::with_capacity(4096);
        buf.push_str(XML_DECLARATION);
        buf.push('\n');
        buf.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NAMESPACE}">"#));
        buf.push('\n');

        Self { buf, url_count: 0 }
    }

    pub fn add_url(&mut self, url: &UrlEntry) {
        self.buf.push_str("  <url>\n");
        push_element(&mut self.buf, "loc", &url.loc);

        if let Some(lastmod) = url.lastmod {
            push_element(&mut self.buf, "lastmod", &format_lastmod(lastmod));
        }

        if let Some(changefreq) = url.changefreq {
            push_element(&mut self.buf, "changefreq", changefreq.as_str());
        }

        if let Some(priority) = url.priority {
            push_element(&mut self.buf, "priority", &format!("{priority:.1}"));
        }

        self.buf.push_str("  </url>\n");
        self.url_count += 1;
    }

    /// Close the document. Returns the XML and the number of entries.
    pub fn finish(mut self) -> (String, usize) {
        self.buf.push_str("</urlset>\n");
        (self.buf, self.url_count)
    }
}

/// Writes a `<sitemapindex>` document.
pub struct SitemapIndexWriter {
    buf: String,
    sitemap_count: usize,
}

impl Default for SitemapIndexWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SitemapIndexWriter {
    pub fn new() -> Self {
        let mut buf = String::with_capacity(1024);
        buf.push_str(XML_DECLARATION);
        buf.push('\n');
        buf.push_str(&format!(r#"<sitemapindex xmlns="{SITEMAP_NAMESPACE}">"#));
        buf.push('\n');

        Self {
            buf,
            sitemap_count: 0,
        }
    }

    pub fn add_sitemap(&mut self, entry: &SitemapEntry) {
        self.buf.push_str("  <sitemap>\n");
        push_element(&mut self.buf, "loc", &entry.loc);

        if let Some(lastmod) = entry.lastmod {
            push_element(&mut self.buf, "lastmod", &format_lastmod(lastmod));
        }

        self.buf.push_str("  </sitemap>\n");
        self.sitemap_count += 1;
    }

    /// Close the document. Returns the XML and the number of entries.
    pub fn finish(mut self) -> (String, usize) {
        self.buf.push_str("</sitemapindex>\n");
        (self.buf, self.sitemap_count)
    }
}

fn push_element(buf: &mut String, name: &str, text: &str) {
    buf.push_str(&format!("    <{name}>{}</{name}>\n", escape(text)));
}

/// W3C datetime in UTC, second precision.
fn format_lastmod(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn urlset_document() {
        let mut writer = UrlSetWriter::new();
        writer.add_url(&UrlEntry {
            loc: "https://example.com/".to_string(),
            lastmod: DateTime::from_timestamp(1_704_067_200, 0),
            changefreq: Some(ChangeFreq::Daily),
            priority: Some(1.0),
        });
        writer.add_url(&UrlEntry::new("https://example.com/about"));

        let (xml, count) = writer.finish();

        assert_eq!(count, 2);
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn loc_is_escaped() {
        let mut writer = UrlSetWriter::new();
        writer.add_url(&UrlEntry::new("https://example.com/?a=1&b=<2>"));

        let (xml, _) = writer.finish();

        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[test]
    fn empty_documents_are_well_formed() {
        let (urlset, urls) = UrlSetWriter::new().finish();
        let (index, sitemaps) = SitemapIndexWriter::new().finish();

        assert_eq!(urls, 0);
        assert_eq!(sitemaps, 0);
        assert!(urlset.contains("<urlset") && urlset.contains("</urlset>"));
        assert!(index.contains("<sitemapindex") && index.contains("</sitemapindex>"));
    }

    #[test]
    fn index_document() {
        let mut writer = SitemapIndexWriter::new();
        writer.add_sitemap(&SitemapEntry {
            loc: "https://example.com/post.xml".to_string(),
            lastmod: None,
        });

        let (xml, count) = writer.finish();

        assert_eq!(count, 1);
        assert!(xml.contains("<sitemap>\n    <loc>https://example.com/post.xml</loc>\n  </sitemap>"));
    }
}
