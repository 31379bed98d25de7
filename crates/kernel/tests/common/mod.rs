//! Common test utilities for integration tests.
//!
//! [`TestApp`] drives the REAL kernel router and state over in-memory
//! stores filled by [`Fixtures`]. Sitemap responses are parsed with
//! quick-xml so assertions count `<loc>` nodes rather than substrings.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use quick_xml::Reader;
use quick_xml::events::Event;
use tower::ServiceExt;

use sitemap_kernel::cache::SitemapCache;
use sitemap_kernel::routes;
use sitemap_kernel::sitemap::SitemapModule;
use sitemap_kernel::{AppState, ContentStore, OptionStorage};
use sitemap_test_utils::Fixtures;

pub const SITE_URL: &str = "http://example.test";

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub fixtures: Fixtures,
}

impl TestApp {
    /// Fresh app with default plugin options and no content.
    pub async fn new() -> Self {
        let fixtures = Fixtures::new();
        let content: Arc<dyn ContentStore> = fixtures.content.clone();
        Self::build(fixtures, content).await
    }

    /// App reading content from `content` instead of the fixture store.
    ///
    /// Options still come from the fixtures, set to defaults.
    pub async fn with_content(content: Arc<dyn ContentStore>) -> Self {
        Self::build(Fixtures::new(), content).await
    }

    async fn build(fixtures: Fixtures, content: Arc<dyn ContentStore>) -> Self {
        fixtures.set_default_options().await;

        let options: Arc<dyn OptionStorage> = fixtures.options.clone();
        let state =
            AppState::from_parts(content, options, SitemapCache::default(), SITE_URL).await;

        Self {
            router: routes::app(state.clone()),
            state,
            fixtures,
        }
    }

    /// Send a GET request through the router.
    pub async fn get(&self, path: &str) -> Response {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// GET a path and return status, content type and body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, Option<String>, String) {
        let response = self.get(path).await;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// GET a sitemap module, asserting success, and return its `<loc>` values.
    pub async fn sitemap_locs(&self, module: &str) -> Vec<String> {
        let (status, _, body) = self.get_text(&format!("/{module}.xml")).await;
        assert_eq!(status, StatusCode::OK, "GET /{module}.xml failed: {body}");
        locs(&body)
    }

    /// Public URL of a module.
    pub fn sitemap_url(&self, module: &str) -> String {
        SitemapModule::parse(module)
            .expect("valid module name")
            .url(SITE_URL)
    }

    /// Public URL of the sitemap index.
    pub fn sitemap_index_url(&self) -> String {
        self.sitemap_url("sitemapindex")
    }
}

/// Text of every `<loc>` element in a sitemap document.
pub fn locs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(t)) if in_loc => locs.push(t.unescape().unwrap().into_owned()),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("invalid sitemap XML: {e}\n{xml}"),
        }
    }

    locs
}

/// Name of the document's root element.
pub fn root_element(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => return String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
            Ok(Event::Eof) => panic!("document has no root element"),
            Ok(_) => {}
            Err(e) => panic!("invalid sitemap XML: {e}"),
        }
    }
}
