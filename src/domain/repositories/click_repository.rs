//! Repository trait for the click log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recorded visits.
///
/// The log is append-only. Rows are removed only through
/// [`delete_by_link`](Self::delete_by_link) as part of deleting their link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records one click with `occurred_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists the clicks of a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError>;

    /// Removes every click of a link and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_link(&self, link_id: i64) -> Result<u64, AppError>;
}
