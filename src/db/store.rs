//! Cache store
//!
//! [`CacheStore`] is what the services read and write cached entities
//! through; [`PgStore`] backs it with the repositories.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::{
    constants::{SYNC_CONTEST_LIST, SYNC_PROBLEMSET},
    error::AppResult,
    models::{
        ContestDetails, ContestInfo, Problem, ProblemFilter, ProblemKey, User, UserInfo,
        UserSolution,
    },
};

use super::repositories::{ContestRepository, ProblemRepository, SyncRepository, UserRepository};

/// A stored value with the time it was last written
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub updated_at: DateTime<Utc>,
}

impl<T> Cached<T> {
    pub fn new(value: T, updated_at: DateTime<Utc>) -> Self {
        Self { value, updated_at }
    }
}

/// Persistence of cached Codeforces entities
///
/// Every `find_*` returns `None` when nothing usable is stored. Writes
/// replace whatever was stored under the same natural key and stamp it
/// with the current time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// User with its solutions and contests
    async fn find_user(&self, handle: &str) -> AppResult<Option<Cached<User>>>;

    /// Store a user, replacing its solutions and contests
    async fn upsert_user(&self, user: &User) -> AppResult<()>;

    async fn find_problem(&self, key: &ProblemKey) -> AppResult<Option<Cached<Problem>>>;

    /// Problems matching `filter`, stamped with the last full problemset
    /// refresh; `None` if the problemset was never stored in full
    async fn find_problems(
        &self,
        filter: &ProblemFilter,
    ) -> AppResult<Option<Cached<Vec<Problem>>>>;

    /// Store problems along with their contests
    async fn upsert_problems(&self, problems: &[Problem]) -> AppResult<()>;

    /// Store the full problemset and record the refresh
    async fn replace_problemset(&self, problems: &[Problem]) -> AppResult<()>;

    /// A finished contest is only returned once its details were stored;
    /// an unfinished one comes back with empty rank and problems
    async fn find_contest(&self, id: i64) -> AppResult<Option<Cached<ContestDetails>>>;

    /// Every stored contest, stamped with the last full list refresh
    async fn find_contests(&self) -> AppResult<Option<Cached<Vec<ContestInfo>>>>;

    /// Store the basic fields of one contest
    async fn upsert_contest(&self, contest: &ContestInfo) -> AppResult<()>;

    /// Store the full contest list and record the refresh
    async fn replace_contests(&self, contests: &[ContestInfo]) -> AppResult<()>;

    /// Store standings and problems of a finished contest
    async fn upsert_contest_details(&self, details: &ContestDetails) -> AppResult<()>;
}

/// Postgres-backed [`CacheStore`]
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store problems and each distinct contest they belong to
    async fn write_problems(conn: &mut PgConnection, problems: &[Problem]) -> AppResult<()> {
        let mut seen_contests = HashSet::new();
        for problem in problems {
            if seen_contests.insert(problem.contest_id()) {
                ContestRepository::upsert_info(conn, &problem.contest).await?;
            }
        }

        let mut seen_problems = HashSet::new();
        for problem in problems {
            if seen_problems.insert(problem.key()) {
                ProblemRepository::upsert(conn, problem).await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CacheStore for PgStore {
    async fn find_user(&self, handle: &str) -> AppResult<Option<Cached<User>>> {
        let Some(row) = UserRepository::find_by_handle(&self.pool, handle).await? else {
            return Ok(None);
        };
        let updated_at = row.updated_at;

        let solutions = UserRepository::solutions(&self.pool, handle)
            .await?
            .into_iter()
            .map(|row| {
                Ok(UserSolution {
                    submission_time_seconds: row.submission_time_seconds,
                    contest_flag: row.contest_flag,
                    problem: Problem::try_from(row.problem)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let contests = UserRepository::contests(&self.pool, handle)
            .await?
            .into_iter()
            .map(ContestInfo::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let user = User {
            info: UserInfo::from(row),
            solutions,
            contests,
        };

        Ok(Some(Cached::new(user, updated_at)))
    }

    async fn upsert_user(&self, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let problems: Vec<Problem> = user.solutions.iter().map(|s| s.problem.clone()).collect();
        Self::write_problems(&mut tx, &problems).await?;
        for contest in &user.contests {
            ContestRepository::upsert_info(&mut tx, contest).await?;
        }

        UserRepository::upsert(&mut tx, &user.info).await?;
        UserRepository::replace_solutions(&mut tx, user.handle(), &user.solutions).await?;

        let contest_ids: Vec<i64> = user.contests.iter().map(|c| c.id).collect();
        UserRepository::replace_participations(&mut tx, user.handle(), &contest_ids).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_problem(&self, key: &ProblemKey) -> AppResult<Option<Cached<Problem>>> {
        let Some(row) = ProblemRepository::find_by_key(&self.pool, key).await? else {
            return Ok(None);
        };
        let updated_at = row.updated_at;

        Ok(Some(Cached::new(Problem::try_from(row)?, updated_at)))
    }

    async fn find_problems(
        &self,
        filter: &ProblemFilter,
    ) -> AppResult<Option<Cached<Vec<Problem>>>> {
        let Some(synced_at) = SyncRepository::synced_at(&self.pool, SYNC_PROBLEMSET).await? else {
            return Ok(None);
        };

        let problems = ProblemRepository::list(&self.pool, filter)
            .await?
            .into_iter()
            .map(Problem::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(Cached::new(problems, synced_at)))
    }

    async fn upsert_problems(&self, problems: &[Problem]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::write_problems(&mut tx, problems).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn replace_problemset(&self, problems: &[Problem]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::write_problems(&mut tx, problems).await?;
        SyncRepository::mark(&mut tx, SYNC_PROBLEMSET).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_contest(&self, id: i64) -> AppResult<Option<Cached<ContestDetails>>> {
        let Some(row) = ContestRepository::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let updated_at = row.updated_at;
        let details_updated_at = row.details_updated_at;
        let info = ContestInfo::try_from(row)?;

        if !info.phase.is_finished() {
            return Ok(Some(Cached::new(ContestDetails::pending(info), updated_at)));
        }

        let Some(details_updated_at) = details_updated_at else {
            return Ok(None);
        };

        let rank = ContestRepository::ranks(&self.pool, id).await?;
        let problems = ProblemRepository::list_by_contest(&self.pool, id)
            .await?
            .into_iter()
            .map(Problem::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let details = ContestDetails {
            info,
            rank,
            problems,
        };
        Ok(Some(Cached::new(details, details_updated_at)))
    }

    async fn find_contests(&self) -> AppResult<Option<Cached<Vec<ContestInfo>>>> {
        let Some(synced_at) = SyncRepository::synced_at(&self.pool, SYNC_CONTEST_LIST).await? else {
            return Ok(None);
        };

        let contests = ContestRepository::list(&self.pool)
            .await?
            .into_iter()
            .map(ContestInfo::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(Cached::new(contests, synced_at)))
    }

    async fn upsert_contest(&self, contest: &ContestInfo) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        ContestRepository::upsert_info(&mut conn, contest).await
    }

    async fn replace_contests(&self, contests: &[ContestInfo]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        for contest in contests {
            ContestRepository::upsert_info(&mut tx, contest).await?;
        }
        SyncRepository::mark(&mut tx, SYNC_CONTEST_LIST).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn upsert_contest_details(&self, details: &ContestDetails) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        ContestRepository::upsert_info(&mut tx, &details.info).await?;
        Self::write_problems(&mut tx, &details.problems).await?;
        ContestRepository::replace_ranks(&mut tx, details.info.id, &details.rank).await?;
        ContestRepository::mark_details(&mut tx, details.info.id).await?;

        tx.commit().await?;
        Ok(())
    }
}
