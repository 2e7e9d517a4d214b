//! Link management service.

use std::sync::Arc;

use crate::domain::entities::{Click, Link, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_code};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;

/// Attempts made with fresh generated codes before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// A newly stored link and its public short URL.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    pub short_url: String,
}

/// A link together with its full click history, newest first.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: Link,
    pub clicks: Vec<Click>,
}

/// Service for creating, listing, inspecting and deleting short links.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
    code_generator: Arc<dyn CodeGenerator>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the externally visible address short URLs are built on;
    /// a trailing slash is ignored.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
            code_generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// # Code Selection
    ///
    /// - A non-empty `custom_code` is validated and used verbatim; if taken,
    ///   the call fails with a conflict.
    /// - Otherwise a random code is generated. A collision on a generated code
    ///   is retried with a fresh one, up to 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is missing or not absolute,
    /// or if the custom code breaks the code rules. Nothing is read from the
    /// store in that case.
    ///
    /// Returns [`AppError::Conflict`] if the custom code already exists.
    ///
    /// Returns [`AppError::Internal`] on storage errors or when every
    /// generated code collided.
    pub async fn create_link(
        &self,
        url: Option<String>,
        custom_code: Option<String>,
    ) -> Result<CreatedLink, AppError> {
        let url = url.ok_or_else(|| AppError::bad_request("URL is required", json!({})))?;
        validate_target_url(&url)?;

        let custom_code = custom_code.filter(|c| !c.is_empty());
        if let Some(code) = &custom_code {
            validate_custom_code(code)?;
        }

        let link = match custom_code {
            Some(code) => self.insert_custom(code, url).await?,
            None => self.insert_generated(url).await?,
        };

        tracing::debug!(code = %link.code, "Link created");

        let short_url = self.short_url(&link.code);
        Ok(CreatedLink { link, short_url })
    }

    /// Returns every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Returns a link's summary with its click history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        let link = self.get_link(code).await?;
        let clicks = self.click_repository.list_by_link(link.id).await?;

        Ok(LinkStats { link, clicks })
    }

    /// Deletes a link and every click recorded for it.
    ///
    /// The link row goes first, and its clicks go with it in the same write
    /// (`ON DELETE CASCADE` in PostgreSQL, the same lock in memory). If that
    /// write fails nothing has changed. The follow-up sweep of the click log
    /// only catches stragglers; its failure is logged, not returned, since the
    /// link is already gone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code, including
    /// when a concurrent delete removed it first.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        let link = self.get_link(code).await?;

        if !self.link_repository.delete(code).await? {
            return Err(link_not_found(code));
        }

        match self.click_repository.delete_by_link(link.id).await {
            Ok(0) => {}
            Ok(stragglers) => {
                tracing::warn!(code, stragglers, "Removed clicks left after link delete")
            }
            Err(e) => tracing::warn!(
                code,
                link_id = link.id,
                error = %e,
                "Failed to sweep clicks of deleted link"
            ),
        }

        tracing::debug!(code, "Link deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    async fn insert_custom(&self, code: String, url: String) -> Result<Link, AppError> {
        let new_link = NewLink {
            code: code.clone(),
            url,
        };

        self.link_repository
            .insert_if_absent(new_link)
            .await?
            .ok_or_else(|| AppError::conflict("Code already exists", json!({ "code": code })))
    }

    async fn insert_generated(&self, url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let new_link = NewLink {
                code: self.code_generator.generate(),
                url: url.clone(),
            };
            let code = new_link.code.clone();

            if let Some(link) = self.link_repository.insert_if_absent(new_link).await? {
                return Ok(link);
            }

            tracing::warn!(code = %code, attempt, "Generated code collided, retrying");
        }

        tracing::error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Failed to generate unique code"
        );
        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Not found", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now(), 0)
    }

    fn service(
        links: MockLinkRepository,
        clicks: MockClickRepository,
        generator: MockCodeGenerator,
    ) -> LinkService {
        LinkService::new(
            Arc::new(links),
            Arc::new(clicks),
            Arc::new(generator),
            "https://s.example.com/",
        )
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| "Ab3dE7z".to_string());

        links
            .expect_insert_if_absent()
            .withf(|l| l.code == "Ab3dE7z" && l.url == "https://example.com")
            .times(1)
            .returning(|l| Ok(Some(create_test_link(1, &l.code, &l.url))));

        let svc = service(links, MockClickRepository::new(), generator);

        let created = svc
            .create_link(Some("https://example.com".to_string()), None)
            .await
            .unwrap();

        assert_eq!(created.link.code, "Ab3dE7z");
        assert_eq!(created.short_url, "https://s.example.com/Ab3dE7z");
    }

    #[tokio::test]
    async fn test_create_link_keeps_url_verbatim() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().returning(|| "code123".to_string());
        links
            .expect_insert_if_absent()
            .withf(|l| l.url == "HTTPS://Example.COM")
            .times(1)
            .returning(|l| Ok(Some(create_test_link(1, &l.code, &l.url))));

        let svc = service(links, MockClickRepository::new(), generator);

        let created = svc
            .create_link(Some("HTTPS://Example.COM".to_string()), None)
            .await
            .unwrap();

        assert_eq!(created.link.url, "HTTPS://Example.COM");
    }

    #[tokio::test]
    async fn test_create_link_retries_generated_collision() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();
        let mut seq = Sequence::new();

        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "taken00".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "fresh00".to_string());

        links
            .expect_insert_if_absent()
            .withf(|l| l.code == "taken00")
            .times(1)
            .returning(|_| Ok(None));
        links
            .expect_insert_if_absent()
            .withf(|l| l.code == "fresh00")
            .times(1)
            .returning(|l| Ok(Some(create_test_link(2, &l.code, &l.url))));

        let svc = service(links, MockClickRepository::new(), generator);

        let created = svc
            .create_link(Some("https://example.com".to_string()), None)
            .await
            .unwrap();

        assert_eq!(created.link.code, "fresh00");
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_max_attempts() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|| "always1".to_string());
        links
            .expect_insert_if_absent()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Ok(None));

        let svc = service(links, MockClickRepository::new(), generator);

        let result = svc
            .create_link(Some("https://example.com".to_string()), None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        links
            .expect_insert_if_absent()
            .withf(|l| l.code == "MyCode")
            .times(1)
            .returning(|l| Ok(Some(create_test_link(3, &l.code, &l.url))));

        let svc = service(links, MockClickRepository::new(), generator);

        let created = svc
            .create_link(
                Some("https://example.com".to_string()),
                Some("MyCode".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(created.link.code, "MyCode");
        assert_eq!(created.short_url, "https://s.example.com/MyCode");
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        links
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(links, MockClickRepository::new(), generator);

        let result = svc
            .create_link(
                Some("https://example.com".to_string()),
                Some("taken".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_link_empty_custom_code_is_generated() {
        let mut links = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| "gen1234".to_string());
        links
            .expect_insert_if_absent()
            .withf(|l| l.code == "gen1234")
            .times(1)
            .returning(|l| Ok(Some(create_test_link(4, &l.code, &l.url))));

        let svc = service(links, MockClickRepository::new(), generator);

        let created = svc
            .create_link(Some("https://example.com".to_string()), Some(String::new()))
            .await
            .unwrap();

        assert_eq!(created.link.code, "gen1234");
    }

    #[tokio::test]
    async fn test_create_link_missing_url_skips_store() {
        let mut links = MockLinkRepository::new();
        links.expect_insert_if_absent().times(0);

        let svc = service(links, MockClickRepository::new(), MockCodeGenerator::new());

        let err = svc.create_link(None, None).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "URL is required");
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut links = MockLinkRepository::new();
        links.expect_insert_if_absent().times(0);

        let svc = service(links, MockClickRepository::new(), MockCodeGenerator::new());

        let result = svc.create_link(Some("not-a-url".to_string()), None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_link_reserved_custom_code() {
        let mut links = MockLinkRepository::new();
        links.expect_insert_if_absent().times(0);

        let svc = service(links, MockClickRepository::new(), MockCodeGenerator::new());

        let result = svc
            .create_link(
                Some("https://example.com".to_string()),
                Some("healthz".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_stats_returns_clicks() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links
            .expect_find_by_code()
            .withf(|code| code == "stats01")
            .times(1)
            .returning(|code| Ok(Some(create_test_link(9, code, "https://example.com"))));
        clicks
            .expect_list_by_link()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|id| {
                Ok(vec![
                    Click::new(2, id, Utc::now(), None, None, None),
                    Click::new(1, id, Utc::now(), Some("1.1.1.1".to_string()), None, None),
                ])
            });

        let svc = service(links, clicks, MockCodeGenerator::new());

        let stats = svc.get_stats("stats01").await.unwrap();

        assert_eq!(stats.link.code, "stats01");
        assert_eq!(stats.clicks.len(), 2);
    }

    #[tokio::test]
    async fn test_get_stats_not_found() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links.expect_find_by_code().returning(|_| Ok(None));
        clicks.expect_list_by_link().times(0);

        let svc = service(links, clicks, MockCodeGenerator::new());

        let result = svc.get_stats("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_link_cascades() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();
        let mut seq = Sequence::new();

        links
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code| Ok(Some(create_test_link(5, code, "https://example.com"))));
        links
            .expect_delete()
            .withf(|code| code == "bye")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        clicks
            .expect_delete_by_link()
            .withf(|id| *id == 5)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(0));

        let svc = service(links, clicks, MockCodeGenerator::new());

        assert!(svc.delete_link("bye").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_failure_keeps_clicks() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links
            .expect_find_by_code()
            .returning(|code| Ok(Some(create_test_link(7, code, "https://example.com"))));
        links
            .expect_delete()
            .times(1)
            .returning(|_| Err(AppError::server_error()));
        clicks.expect_delete_by_link().times(0);

        let svc = service(links, clicks, MockCodeGenerator::new());

        let result = svc.delete_link("kept").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_delete_link_sweep_failure_is_not_an_error() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links
            .expect_find_by_code()
            .returning(|code| Ok(Some(create_test_link(8, code, "https://example.com"))));
        links.expect_delete().returning(|_| Ok(true));
        clicks
            .expect_delete_by_link()
            .returning(|_| Err(AppError::server_error()));

        let svc = service(links, clicks, MockCodeGenerator::new());

        assert!(svc.delete_link("swept").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links.expect_find_by_code().returning(|_| Ok(None));
        links.expect_delete().times(0);
        clicks.expect_delete_by_link().times(0);

        let svc = service(links, clicks, MockCodeGenerator::new());

        let result = svc.delete_link("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_link_lost_race() {
        let mut links = MockLinkRepository::new();
        let mut clicks = MockClickRepository::new();

        links
            .expect_find_by_code()
            .returning(|code| Ok(Some(create_test_link(6, code, "https://example.com"))));
        clicks.expect_delete_by_link().times(0);
        links.expect_delete().returning(|_| Ok(false));

        let svc = service(links, clicks, MockCodeGenerator::new());

        let result = svc.delete_link("raced").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let svc = service(
            MockLinkRepository::new(),
            MockClickRepository::new(),
            MockCodeGenerator::new(),
        );

        assert_eq!(svc.short_url("abc"), "https://s.example.com/abc");
    }
}
