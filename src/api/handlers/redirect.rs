//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::net::SocketAddr;
use url::Url;

use crate::domain::visit::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Visitor metadata pulled from the request.
///
/// Never rejects: a missing peer address or unreadable header only leaves the
/// corresponding field empty.
pub struct ClientVisit(pub Visit);

impl FromRequestParts<AppState> for ClientVisit {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let header_str = |name: header::HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
        };

        Ok(Self(Visit::new(
            client_ip(&parts.headers, peer, state.behind_proxy),
            header_str(header::USER_AGENT),
            header_str(header::REFERER),
        )))
    }
}

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code
/// 2. Record the click and bump the visit counter (failures are logged only)
/// 3. Return 302 Found
///
/// The mapping can be deleted later, so the redirect is never permanent.
///
/// # Errors
///
/// Errors are plain text rather than JSON, since this endpoint is hit by
/// browsers:
///
/// - 404 `Short URL not found` for an unknown code
/// - 500 `Server error` if the lookup fails
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ClientVisit(visit): ClientVisit,
) -> Response {
    match state.redirect_service.resolve(&code, visit).await {
        Ok(link) => match location_header(&link.url) {
            Some(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            None => {
                tracing::error!(code = %code, "Stored URL cannot be sent as a Location header");
                plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        },
        Err(err @ AppError::NotFound { .. }) => {
            plain_error(err.status_code(), "Short URL not found")
        }
        Err(err) => plain_error(err.status_code(), "Server error"),
    }
}

/// Uses the stored URL as-is when it is a valid header value, otherwise its
/// percent-encoded serialization.
fn location_header(url: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(url).ok().or_else(|| {
        Url::parse(url)
            .ok()
            .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
    })
}

fn plain_error(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}
