//! Client metadata captured for a single redirect.

use crate::domain::entities::NewClick;

/// What the redirect path knows about the visitor.
///
/// Every field is best-effort: missing or non-UTF-8 headers and an unknown
/// peer address simply leave the field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Visit {
    /// Creates a new visit.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_url::domain::visit::Visit;
    ///
    /// let visit = Visit::new(
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     None,
    /// );
    /// assert_eq!(visit.user_agent.as_deref(), Some("Mozilla/5.0"));
    /// assert!(visit.referrer.is_none());
    /// ```
    pub fn new(ip: Option<String>, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(str::to_string),
            referrer: referrer.map(str::to_string),
        }
    }

    /// Turns the visit into a click row for the given link.
    pub fn into_new_click(self, link_id: i64) -> NewClick {
        NewClick {
            link_id,
            ip: self.ip,
            user_agent: self.user_agent,
            referrer: self.referrer,
        }
    }
}
