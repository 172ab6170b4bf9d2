//! Route definitions for the pagination API.

pub mod health;
pub mod pagination;
pub mod records;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/pagination/plan", get(pagination::plan))
        .route("/pagination/links", get(pagination::links))
        .route("/records", get(records::list))
        .route("/records/links", get(records::links))
        .route("/records/sql", get(records::sql));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
