//! Problem repository

use sqlx::{PgConnection, PgPool};

use crate::{
    error::AppResult,
    models::{Problem, ProblemFilter, ProblemKey, ProblemRow},
};

/// Problem columns joined with the owning contest, as read by [`ProblemRow`]
pub(crate) const PROBLEM_COLUMNS: &str = r#"
    p.contest_id, p.problem_index, p.name, p.tags, p.difficulty, p.updated_at,
    c.name AS contest_name, c.contest_type, c.phase AS contest_phase,
    c.start_time_seconds AS contest_start_time_seconds
"#;

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Insert or refresh a problem; its contest must already be stored
    pub async fn upsert(conn: &mut PgConnection, problem: &Problem) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO problems (contest_id, problem_index, name, level, tags, difficulty)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (contest_id, problem_index) DO UPDATE
            SET
                name = EXCLUDED.name,
                level = EXCLUDED.level,
                tags = EXCLUDED.tags,
                difficulty = EXCLUDED.difficulty,
                updated_at = NOW()
            "#,
        )
        .bind(problem.contest_id())
        .bind(&problem.index)
        .bind(&problem.name)
        .bind(problem.level())
        .bind(&problem.tags)
        .bind(problem.difficulty)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Find problem by its `(contest id, index)` key
    pub async fn find_by_key(pool: &PgPool, key: &ProblemKey) -> AppResult<Option<ProblemRow>> {
        let problem = sqlx::query_as::<_, ProblemRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS}
            FROM problems p
            JOIN contests c ON c.id = p.contest_id
            WHERE p.contest_id = $1 AND p.problem_index = $2
            "#
        ))
        .bind(key.contest_id)
        .bind(&key.index)
        .fetch_optional(pool)
        .await?;

        Ok(problem)
    }

    /// Problems of a contest in index order
    pub async fn list_by_contest(pool: &PgPool, contest_id: i64) -> AppResult<Vec<ProblemRow>> {
        let problems = sqlx::query_as::<_, ProblemRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS}
            FROM problems p
            JOIN contests c ON c.id = p.contest_id
            WHERE p.contest_id = $1
            ORDER BY p.problem_index
            "#
        ))
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Problems matching a filter, newest contest first
    ///
    /// Mirrors [`ProblemFilter::matches`]: a NULL difficulty or start time
    /// fails any bound placed on it.
    pub async fn list(pool: &PgPool, filter: &ProblemFilter) -> AppResult<Vec<ProblemRow>> {
        let problems = sqlx::query_as::<_, ProblemRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS}
            FROM problems p
            JOIN contests c ON c.id = p.contest_id
            WHERE ($1::text IS NULL OR p.level COLLATE "C" >= $1)
              AND ($2::text IS NULL OR p.level COLLATE "C" <= $2)
              AND ($3::int IS NULL OR p.difficulty >= $3)
              AND ($4::int IS NULL OR p.difficulty <= $4)
              AND ($5::bigint IS NULL OR c.start_time_seconds >= $5)
              AND ($6::bigint IS NULL OR c.start_time_seconds <= $6)
              AND (
                  cardinality($7::text[]) = 0
                  OR ($8 AND p.tags && $7)
                  OR (NOT $8 AND p.tags @> $7)
              )
            ORDER BY p.contest_id DESC, p.problem_index
            "#
        ))
        .bind(filter.level_from.as_deref())
        .bind(filter.level_to.as_deref())
        .bind(filter.difficulty_from)
        .bind(filter.difficulty_to)
        .bind(filter.time_seconds_from)
        .bind(filter.time_seconds_to)
        .bind(&filter.tags)
        .bind(filter.combine_tags_by_or)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }
}
