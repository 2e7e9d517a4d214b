//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link store.
///
/// Implementations must make [`insert_if_absent`](Self::insert_if_absent) and
/// [`increment_visits`](Self::increment_visits) atomic with respect to
/// concurrent callers: two inserts of one code never both succeed, and
/// concurrent increments are never lost.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link with `visits = 0` and `created_at = now` unless the code
    /// is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the stored row
    /// - `Ok(None)` if a link with the same code already exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically adds one to the link's visit counter.
    ///
    /// Returns `Ok(false)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_visits(&self, code: &str) -> Result<bool, AppError>;

    /// Removes a link together with its click log in a single write.
    ///
    /// Returns `Ok(true)` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
