//! Sitemap routes.
//!
//! `/sitemapindex.xml` serves the index; `/{module}.xml` serves one module
//! (`/post.xml`, `/post_movie.xml`, `/taxonomy_genre.xml`).

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::sitemap::{INDEX_MODULE, RenderedSitemap};
use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Create the sitemap router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sitemapindex.xml", get(sitemap_index))
        .route("/{file}", get(sitemap_module))
}

async fn sitemap_index(State(state): State<AppState>) -> AppResult<Response> {
    let rendered = state.sitemaps().render(INDEX_MODULE).await?;
    Ok(xml_response(rendered))
}

async fn sitemap_module(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> AppResult<Response> {
    let Some(module) = file.strip_suffix(".xml") else {
        return Err(AppError::NotFound);
    };

    let rendered = state.sitemaps().render(module).await?;
    Ok(xml_response(rendered))
}

fn xml_response(rendered: RenderedSitemap) -> Response {
    ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], rendered.xml).into_response()
}
