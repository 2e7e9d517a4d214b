//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// Individual click event information.
///
/// Missing metadata is serialized as `null` so every entry has the same shape.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub occurred_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            occurred_at: click.occurred_at,
            ip: click.ip,
            user_agent: click.user_agent,
            referrer: click.referrer,
        }
    }
}
