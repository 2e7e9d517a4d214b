//! Handler for detailed link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link's summary and its full click history.
///
/// # Endpoint
///
/// `GET /api/links/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "code": "promo",
///   "url": "https://example.com/a",
///   "visits": 1,
///   "clicks": [
///     {
///       "occurred_at": "2025-01-01T12:00:00Z",
///       "ip": "203.0.113.7",
///       "user_agent": "Mozilla/5.0",
///       "referrer": null
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.get_stats(&code).await?;

    Ok(Json(stats.into()))
}
