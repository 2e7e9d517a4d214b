//! Target URL validation.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Checks that `input` is a syntactically valid absolute URL.
///
/// The URL is only parsed, never rewritten: the caller stores `input`
/// verbatim so the redirect goes to exactly what was submitted.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the input is empty, relative, or
/// otherwise unparseable.
///
/// # Examples
///
/// ```
/// use tiny_url::utils::url_validator::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/a").is_ok());
/// assert!(validate_target_url("not-a-url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<(), AppError> {
    if input.trim().is_empty() {
        return Err(AppError::bad_request("URL is required", json!({})));
    }

    Url::parse(input).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    Ok(())
}
