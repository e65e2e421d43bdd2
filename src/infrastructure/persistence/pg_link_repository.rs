//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::utils::code_generator::is_valid_code;
use crate::utils::db_error::map_sqlx_error;

/// Row shape shared by every query returning a full link.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    code: String,
    destination_url: String,
    owner_email: String,
    total_clicks: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            code: row.code,
            destination_url: row.destination_url,
            owner_email: row.owner_email,
            total_clicks: row.total_clicks,
            last_clicked_at: row.last_clicked_at,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness is enforced by the `links_code_key` constraint and the code
/// alphabet by the `links_code_format` check, so both hold even for rows
/// written outside this service. Visits are a single `UPDATE ... RETURNING`,
/// which takes the row lock for the duration of the increment.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        if !is_valid_code(&new_link.code) {
            return Err(StoreError::InvalidCode);
        }

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, destination_url, owner_email)
            VALUES ($1, $2, $3)
            RETURNING code, destination_url, owner_email, total_clicks, last_clicked_at, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.destination_url)
        .bind(&new_link.owner_email)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, destination_url, owner_email, total_clicks, last_clicked_at, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, destination_url, owner_email, total_clicks, last_clicked_at, created_at
            FROM links
            WHERE owner_email = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(email)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, StoreError> {
        let destination = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked_at = NOW()
            WHERE code = $1
            RETURNING destination_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(destination)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
