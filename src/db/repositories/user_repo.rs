//! User repository

use sqlx::{PgConnection, PgPool};

use crate::{
    error::AppResult,
    models::{ContestRow, UserInfo, UserRow, UserSolution, SolutionRow},
};

use super::problem_repo::PROBLEM_COLUMNS;

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert or refresh a user's profile fields
    pub async fn upsert(conn: &mut PgConnection, info: &UserInfo) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                handle, name, country, city, organization, rating, max_rating,
                registration_time_seconds, photo_link
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (handle) DO UPDATE
            SET
                name = EXCLUDED.name,
                country = EXCLUDED.country,
                city = EXCLUDED.city,
                organization = EXCLUDED.organization,
                rating = EXCLUDED.rating,
                max_rating = EXCLUDED.max_rating,
                registration_time_seconds = EXCLUDED.registration_time_seconds,
                photo_link = EXCLUDED.photo_link,
                updated_at = NOW()
            "#,
        )
        .bind(&info.handle)
        .bind(&info.name)
        .bind(&info.country)
        .bind(&info.city)
        .bind(&info.organization)
        .bind(info.rating)
        .bind(info.max_rating)
        .bind(info.registration_time_seconds)
        .bind(&info.photo_link)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Find user by handle
    pub async fn find_by_handle(pool: &PgPool, handle: &str) -> AppResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(r#"SELECT * FROM users WHERE handle = $1"#)
            .bind(handle)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Stored solutions of a user, latest first
    pub async fn solutions(pool: &PgPool, handle: &str) -> AppResult<Vec<SolutionRow>> {
        let solutions = sqlx::query_as::<_, SolutionRow>(&format!(
            r#"
            SELECT s.submission_time_seconds, s.contest_flag, {PROBLEM_COLUMNS}
            FROM solutions s
            JOIN problems p
              ON p.contest_id = s.contest_id AND p.problem_index = s.problem_index
            JOIN contests c ON c.id = p.contest_id
            WHERE s.user_handle = $1
            ORDER BY s.submission_time_seconds DESC, s.contest_id DESC, s.problem_index
            "#
        ))
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(solutions)
    }

    /// Contests a user took part in, in stored order
    pub async fn contests(pool: &PgPool, handle: &str) -> AppResult<Vec<ContestRow>> {
        let contests = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT c.*
            FROM participations pa
            JOIN contests c ON c.id = pa.contest_id
            WHERE pa.user_handle = $1
            ORDER BY pa.row_order
            "#,
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Replace the stored solutions of a user; their problems must be stored
    pub async fn replace_solutions(
        conn: &mut PgConnection,
        handle: &str,
        solutions: &[UserSolution],
    ) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM solutions WHERE user_handle = $1"#)
            .bind(handle)
            .execute(&mut *conn)
            .await?;

        if solutions.is_empty() {
            return Ok(());
        }

        let contest_ids: Vec<i64> = solutions.iter().map(|s| s.problem.contest_id()).collect();
        let indexes: Vec<&str> = solutions.iter().map(|s| s.problem.index.as_str()).collect();
        let times: Vec<i64> = solutions.iter().map(|s| s.submission_time_seconds).collect();
        let flags: Vec<bool> = solutions.iter().map(|s| s.contest_flag).collect();

        sqlx::query(
            r#"
            INSERT INTO solutions (
                user_handle, contest_id, problem_index, submission_time_seconds, contest_flag
            )
            SELECT $1, t.contest_id, t.problem_index, t.submission_time_seconds, t.contest_flag
            FROM UNNEST($2::bigint[], $3::text[], $4::bigint[], $5::bool[])
                AS t(contest_id, problem_index, submission_time_seconds, contest_flag)
            "#,
        )
        .bind(handle)
        .bind(&contest_ids)
        .bind(&indexes)
        .bind(&times)
        .bind(&flags)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Replace the participations of a user; the contests must be stored
    pub async fn replace_participations(
        conn: &mut PgConnection,
        handle: &str,
        contest_ids: &[i64],
    ) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM participations WHERE user_handle = $1"#)
            .bind(handle)
            .execute(&mut *conn)
            .await?;

        if contest_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO participations (user_handle, contest_id, row_order)
            SELECT $1, t.contest_id, t.ord::int
            FROM UNNEST($2::bigint[]) WITH ORDINALITY AS t(contest_id, ord)
            "#,
        )
        .bind(handle)
        .bind(contest_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
