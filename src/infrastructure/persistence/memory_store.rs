//! In-memory implementation of both storage contracts.
//!
//! Nothing survives a restart. Used for `STORAGE_BACKEND=memory` and by the
//! HTTP tests, which need a store with the same atomicity guarantees as
//! PostgreSQL but no running server.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Click, Link, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Links and clicks behind a single mutex.
///
/// Every operation takes the lock once and never awaits while holding it, so
/// check-then-insert and counter increments are atomic. Deleting a link also
/// drops its clicks, matching the `ON DELETE CASCADE` of the SQL schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    links: BTreeMap<i64, Link>,
    codes: HashMap<String, i64>,
    clicks: HashMap<i64, Vec<Click>>,
    last_link_id: i64,
    last_click_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner.lock().map_err(|_| {
            tracing::error!("Memory store lock poisoned");
            AppError::server_error()
        })
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let mut inner = self.lock()?;

        if inner.codes.contains_key(&new_link.code) {
            return Ok(None);
        }

        inner.last_link_id += 1;
        let id = inner.last_link_id;
        let link = Link::new(id, new_link.code, new_link.url, Utc::now(), 0);

        inner.codes.insert(link.code.clone(), id);
        inner.links.insert(id, link.clone());

        Ok(Some(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.lock()?;

        Ok(inner
            .codes
            .get(code)
            .and_then(|id| inner.links.get(id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let inner = self.lock()?;

        let mut links: Vec<Link> = inner.links.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links)
    }

    async fn increment_visits(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.lock()?;

        let Some(id) = inner.codes.get(code).copied() else {
            return Ok(false);
        };

        match inner.links.get_mut(&id) {
            Some(link) => {
                link.visits += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.lock()?;

        let Some(id) = inner.codes.remove(code) else {
            return Ok(false);
        };

        inner.links.remove(&id);
        inner.clicks.remove(&id);

        Ok(true)
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut inner = self.lock()?;

        if !inner.links.contains_key(&new_click.link_id) {
            return Err(AppError::bad_request(
                "Link does not exist",
                json!({ "link_id": new_click.link_id }),
            ));
        }

        inner.last_click_id += 1;
        let click = Click::new(
            inner.last_click_id,
            new_click.link_id,
            Utc::now(),
            new_click.ip,
            new_click.user_agent,
            new_click.referrer,
        );

        inner
            .clicks
            .entry(click.link_id)
            .or_default()
            .push(click.clone());

        Ok(click)
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let inner = self.lock()?;

        // Stored oldest first; ids grow with time.
        Ok(inner
            .clicks
            .get(&link_id)
            .map(|clicks| clicks.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_by_link(&self, link_id: i64) -> Result<u64, AppError> {
        let mut inner = self.lock()?;

        Ok(inner
            .clicks
            .remove(&link_id)
            .map(|clicks| clicks.len() as u64)
            .unwrap_or(0))
    }
}
