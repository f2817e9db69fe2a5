//! Problem service

use crate::{
    codeforces::{convert, CodeforcesApi},
    constants::STALENESS_THRESHOLD_SECONDS,
    db::CacheStore,
    error::{AppError, AppResult},
    models::{Problem, ProblemFilter, ProblemKey, Problemset},
    utils::{age_of, is_fresh},
};

use super::{arena::ContestArena, statistics};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Cached problem, refetched from its contest's standings once stale
    pub async fn get_problem(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        key: &ProblemKey,
    ) -> AppResult<Problem> {
        if let Some(cached) = store.find_problem(key).await? {
            if is_fresh(cached.updated_at, STALENESS_THRESHOLD_SECONDS) {
                tracing::debug!(%key, age = %age_of(cached.updated_at), "Serving cached problem");
                return Ok(cached.value);
            }
        }

        let standings = api.contest_standings(key.contest_id, 1, 1).await?;
        let contest = convert::contest_info(&standings.contest);
        let problems: Vec<Problem> = standings
            .problems
            .iter()
            .map(|problem| convert::problem(problem, &contest))
            .collect();

        let problem = problems
            .iter()
            .find(|problem| problem.index == key.index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Problem {}", key)))?;

        if let Err(e) = store.upsert_problems(&problems).await {
            tracing::warn!(%key, error = %e, "Failed to store problems, serving them unstored");
        }

        Ok(problem)
    }

    /// Problems matching `filter` with their histograms, newest contest
    /// first and by index within a contest
    pub async fn get_problemset(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        filter: &ProblemFilter,
    ) -> AppResult<Problemset> {
        let problems = match store.find_problems(filter).await? {
            Some(cached) if is_fresh(cached.updated_at, STALENESS_THRESHOLD_SECONDS) => {
                tracing::debug!(
                    count = cached.value.len(),
                    age = %age_of(cached.updated_at),
                    "Serving cached problemset"
                );
                cached.value
            }
            _ => Self::fetch_problemset(api, store, filter).await?,
        };

        let statistics = statistics::tally(&problems);
        Ok(Problemset {
            problems,
            statistics,
        })
    }

    async fn fetch_problemset(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        filter: &ProblemFilter,
    ) -> AppResult<Vec<Problem>> {
        let problemset = api.problemset_problems().await?;

        let mut arena = ContestArena::new(api);
        let problems = arena.resolve_all(&problemset.problems).await?;

        tracing::info!(count = problems.len(), "Fetched problemset from Codeforces");

        if let Err(e) = store.replace_problemset(&problems).await {
            tracing::warn!(error = %e, "Failed to store problemset, serving it unstored");
        }

        let mut problems: Vec<Problem> = problems
            .into_iter()
            .filter(|problem| filter.matches(problem))
            .collect();
        problems.sort_by(|a, b| {
            b.contest_id()
                .cmp(&a.contest_id())
                .then_with(|| a.index.cmp(&b.index))
        });

        Ok(problems)
    }
}
