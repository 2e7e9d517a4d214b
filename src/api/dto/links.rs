//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreatedLink;
use crate::domain::entities::Link;

/// Request to create a short link.
///
/// `url` is optional at the serde level so a missing field reaches the
/// service and is reported as "URL is required" rather than a parse error.
/// `custom_code` is checked by the service, which owns the code rules.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: Option<String>,

    #[serde(rename = "customCode")]
    pub custom_code: Option<String>,
}

/// Response for a created link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub code: String,
    #[serde(rename = "shortUrl")]
    pub short_url: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedLink> for CreateLinkResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            code: created.link.code,
            short_url: created.short_url,
            url: created.link.url,
            created_at: created.link.created_at,
        }
    }
}

/// One entry of `GET /api/links`. Click details are omitted.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub visits: i64,
}

impl From<Link> for LinkSummary {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.url,
            created_at: link.created_at,
            visits: link.visits,
        }
    }
}

/// Response for a deleted link.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
}
