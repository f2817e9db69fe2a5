//! Contest repository

use sqlx::{PgConnection, PgPool};

use crate::{
    error::AppResult,
    models::{ContestInfo, ContestRank, ContestRankRow, ContestRow},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Insert or refresh the basic fields of a contest
    pub async fn upsert_info(conn: &mut PgConnection, contest: &ContestInfo) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contests (id, name, contest_type, phase, start_time_seconds)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET
                name = EXCLUDED.name,
                contest_type = EXCLUDED.contest_type,
                phase = EXCLUDED.phase,
                start_time_seconds = EXCLUDED.start_time_seconds,
                updated_at = NOW()
            "#,
        )
        .bind(contest.id)
        .bind(&contest.name)
        .bind(contest.contest_type.as_str())
        .bind(contest.phase.as_str())
        .bind(contest.start_time_seconds)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Record that standings and problems of a contest were stored
    pub async fn mark_details(conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query(r#"UPDATE contests SET details_updated_at = NOW() WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Replace the stored standings of a contest, keeping their order
    pub async fn replace_ranks(
        conn: &mut PgConnection,
        id: i64,
        ranks: &[ContestRank],
    ) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM contest_ranks WHERE contest_id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if ranks.is_empty() {
            return Ok(());
        }

        let handles: Vec<&str> = ranks.iter().map(|r| r.handle.as_str()).collect();
        let positions: Vec<i32> = ranks.iter().map(|r| r.position).collect();

        sqlx::query(
            r#"
            INSERT INTO contest_ranks (contest_id, row_order, user_handle, position)
            SELECT $1, t.ord::int, t.user_handle, t.position
            FROM UNNEST($2::text[], $3::int[]) WITH ORDINALITY AS t(user_handle, position, ord)
            "#,
        )
        .bind(id)
        .bind(&handles)
        .bind(&positions)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<ContestRow>> {
        let contest = sqlx::query_as::<_, ContestRow>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// List every stored contest, most recent first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<ContestRow>> {
        let contests = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT * FROM contests
            ORDER BY start_time_seconds DESC NULLS FIRST, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Stored standings of a contest
    pub async fn ranks(pool: &PgPool, id: i64) -> AppResult<Vec<ContestRank>> {
        let rows = sqlx::query_as::<_, ContestRankRow>(
            r#"
            SELECT user_handle, position FROM contest_ranks
            WHERE contest_id = $1
            ORDER BY row_order
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(ContestRank::from).collect())
    }
}
