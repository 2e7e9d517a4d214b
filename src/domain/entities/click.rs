//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is followed.
///
/// Clicks are append-only: they are never updated and disappear only
/// together with the link they reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub occurred_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    ///
    /// All client metadata is optional; a redirect is recorded even when the
    /// request carries no address or headers.
    pub fn new(
        id: i64,
        link_id: i64,
        occurred_at: DateTime<Utc>,
        ip: Option<String>,
        user_agent: Option<String>,
        referrer: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            occurred_at,
            ip,
            user_agent,
            referrer,
        }
    }
}

/// Input data for appending a click.
///
/// `link_id` must reference an existing link; `occurred_at` is assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}
