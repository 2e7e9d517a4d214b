//! DTOs for detailed link statistics.

use serde::Serialize;

use super::clicks::ClickInfo;
use crate::application::services::LinkStats;

/// Link summary with its full click history, newest first.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub url: String,
    pub visits: i64,
    pub clicks: Vec<ClickInfo>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            code: stats.link.code,
            url: stats.link.url,
            visits: stats.link.visits,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
