//! Short code resolution and visit recording.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::domain::visit::Visit;
use crate::error::AppError;
use serde_json::json;

/// Service behind `GET /{code}`.
///
/// # Recording Policy
///
/// A visit is two writes: the click row is appended first, then the link's
/// counter is incremented. They are not wrapped in a transaction. A failure
/// of either write is logged and the redirect still happens; only a failed
/// lookup aborts the request.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Resolves `code` and records the visit.
    ///
    /// Returns the resolved link; the caller redirects to its `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str, visit: Visit) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        self.record_visit(&link, visit).await;

        Ok(link)
    }

    async fn record_visit(&self, link: &Link, visit: Visit) {
        if let Err(e) = self
            .click_repository
            .append(visit.into_new_click(link.id))
            .await
        {
            tracing::warn!(
                code = %link.code,
                link_id = link.id,
                error = %e,
                "Failed to append click; visit counter and click log may diverge"
            );
        }

        match self.link_repository.increment_visits(&link.code).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(
                code = %link.code,
                link_id = link.id,
                "Link vanished before its visit counter was incremented"
            ),
            Err(e) => tracing::warn!(
                code = %link.code,
                link_id = link.id,
                error = %e,
                "Failed to increment visit counter; visit counter and click log may diverge"
            ),
        }
    }
}
