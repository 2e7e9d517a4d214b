//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, list_links_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`               - Create a short link
/// - `GET    /links`               - List all links, newest first
/// - `GET    /links/{code}/stats`  - Visit count and click log for a link
/// - `DELETE /links/{code}`        - Delete a link and its clicks
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{code}", delete(delete_link_handler))
        .route("/links/{code}/stats", get(stats_handler))
}
