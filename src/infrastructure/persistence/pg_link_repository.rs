//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Atomicity comes from the database itself: the `links_code_key` unique
/// constraint backs insert-if-absent, and click increments are a single
/// `UPDATE ... SET click_count = click_count + 1` statement.
///
/// `created_at` is taken from the application clock, the same clock expiry is
/// checked against, and truncated to the microsecond precision of
/// `TIMESTAMPTZ`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    target_url: String,
    owner_id: Option<String>,
    created_at: DateTime<Utc>,
    life_time_seconds: Option<i64>,
    click_count: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.target_url,
            row.owner_id,
            row.created_at,
            row.life_time_seconds,
            row.click_count,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url, owner_id, life_time_seconds, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, target_url, owner_id, created_at, life_time_seconds, click_count
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .bind(&new_link.owner_id)
        .bind(new_link.life_time_seconds)
        .bind(Utc::now().trunc_subsecs(6))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or_else(|| {
            AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            )
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, owner_id, created_at, life_time_seconds, click_count
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE code = $1
            RETURNING click_count
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
