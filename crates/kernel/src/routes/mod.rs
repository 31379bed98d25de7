//! HTTP route handlers.

pub mod health;
pub mod sitemap;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(sitemap::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
