//! Full-list refresh markers

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::AppResult;

/// Repository for the `sync_state` table
pub struct SyncRepository;

impl SyncRepository {
    /// Record that `resource` was refreshed in full just now
    pub async fn mark(conn: &mut PgConnection, resource: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sync_state (resource) VALUES ($1)
            ON CONFLICT (resource) DO UPDATE SET synced_at = NOW()
            "#,
        )
        .bind(resource)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// When `resource` was last refreshed in full, if ever
    pub async fn synced_at(pool: &PgPool, resource: &str) -> AppResult<Option<DateTime<Utc>>> {
        let synced_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"SELECT synced_at FROM sync_state WHERE resource = $1"#,
        )
        .bind(resource)
        .fetch_optional(pool)
        .await?;

        Ok(synced_at)
    }
}
