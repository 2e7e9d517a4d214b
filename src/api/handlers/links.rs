//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, DeleteLinkResponse, LinkSummary,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "customCode": "promo"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "promo",
///   "shortUrl": "https://s.example.com/promo",
///   "url": "https://example.com/a",
///   "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, the URL is missing or
/// invalid, or the custom code is malformed.
/// Returns 409 Conflict if the custom code already exists.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .link_service
        .create_link(payload.url, payload.custom_code)
        .await?;

    Ok(Json(created.into()))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Response
///
/// ```json
/// [
///   { "code": "promo", "url": "https://example.com/a", "created_at": "...", "visits": 3 }
/// ]
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkSummary>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkSummary::from).collect()))
}

/// Deletes a short link together with its click history.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse { success: true }))
}
