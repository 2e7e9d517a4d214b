//! Short code generation and validation utilities.
//!
//! Generated codes are random, never derived from row ids, so the code space
//! cannot be walked by counting.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 7;

/// Maximum length of a user-provided custom code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Codes that would shadow fixed routes (`/api/...`, `/healthz`).
pub const RESERVED_CODES: &[&str] = &["api", "healthz"];

/// Source of fresh short codes.
///
/// Injected into [`crate::application::services::LinkService`] so collision
/// handling can be tested with a deterministic generator.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a new candidate code. Uniqueness is not guaranteed.
    fn generate(&self) -> String;
}

/// Generates [`CODE_LENGTH`]-character codes from `[A-Za-z0-9]`.
///
/// Backed by the thread-local CSPRNG, each character is drawn uniformly from
/// the 62-symbol alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// # Examples
///
/// ```
/// use tiny_url::utils::code_generator::generate_code;
///
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved path segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-64 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens, and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
