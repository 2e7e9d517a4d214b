//! PostgreSQL implementation of the click log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for recorded visits.
///
/// `clicks.link_id` references `links(id)` with `ON DELETE CASCADE`, so a
/// click can never outlive or precede its link.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    occurred_at: DateTime<Utc>,
    ip: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click::new(r.id, r.link_id, r.occurred_at, r.ip, r.user_agent, r.referrer)
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (link_id, ip, user_agent, referrer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, occurred_at, ip, user_agent, referrer
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.ip)
        .bind(&new_click.user_agent)
        .bind(&new_click.referrer)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error()
                && db.is_foreign_key_violation()
            {
                return AppError::bad_request(
                    "Link does not exist",
                    json!({ "link_id": new_click.link_id }),
                );
            }
            AppError::from(e)
        })?;

        Ok(row.into())
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, link_id, occurred_at, ip, user_agent, referrer
            FROM clicks
            WHERE link_id = $1
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn delete_by_link(&self, link_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM clicks WHERE link_id = $1")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
