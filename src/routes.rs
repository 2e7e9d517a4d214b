//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET  /{code}`    - Short link redirect
//! - `GET  /healthz`   - Liveness check
//! - `/api/*`          - JSON API
//!
//! Every route is wrapped in request tracing and a permissive CORS policy.
//! Trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and per-request middleware, without path normalization.
///
/// Path normalization has to wrap the whole router, so it cannot be added
/// as a layer here; [`app_router`] applies it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}
