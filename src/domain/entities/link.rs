//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to its target URL.
///
/// `code` is unique and never changes after creation. `visits` only grows and
/// is mutated exclusively by the redirect path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub visits: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>, visits: i64) -> Self {
        Self {
            id,
            code,
            url,
            created_at,
            visits,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}
