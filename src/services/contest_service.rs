//! Contest service

use crate::{
    codeforces::{convert, CodeforcesApi},
    constants::STALENESS_THRESHOLD_SECONDS,
    db::CacheStore,
    error::{AppError, AppResult},
    models::{ContestDetails, ContestInfo},
    utils::{age_of, is_fresh},
};

use super::arena::ContestArena;

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// Cached contest details, refetched once stale
    ///
    /// Standings and problems are only fetched and stored for finished
    /// contests; any other phase yields empty `rank` and `problems` and
    /// stores the contest info alone.
    pub async fn get_contest(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        standings_count: u32,
        id: i64,
    ) -> AppResult<ContestDetails> {
        if let Some(cached) = store.find_contest(id).await? {
            if is_fresh(cached.updated_at, STALENESS_THRESHOLD_SECONDS) {
                tracing::debug!(id, age = %age_of(cached.updated_at), "Serving cached contest");
                return Ok(cached.value);
            }
        }

        let info = ContestArena::new(api)
            .contest(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest {}", id)))?;

        if !info.phase.is_finished() {
            if let Err(e) = store.upsert_contest(&info).await {
                tracing::warn!(id, error = %e, "Failed to store contest, serving it unstored");
            }
            return Ok(ContestDetails::pending(info));
        }

        let standings = api.contest_standings(id, 1, standings_count).await?;
        let details = convert::contest_details(&standings);

        tracing::info!(
            id,
            ranks = details.rank.len(),
            problems = details.problems.len(),
            "Fetched contest from Codeforces"
        );

        if let Err(e) = store.upsert_contest_details(&details).await {
            tracing::warn!(
                id,
                error = %e,
                "Failed to store contest details, serving them unstored"
            );
        }

        Ok(details)
    }

    /// Every non-gym contest, refetched once the stored list is stale
    pub async fn list_contests(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
    ) -> AppResult<Vec<ContestInfo>> {
        if let Some(cached) = store.find_contests().await? {
            if is_fresh(cached.updated_at, STALENESS_THRESHOLD_SECONDS) {
                tracing::debug!(
                    count = cached.value.len(),
                    age = %age_of(cached.updated_at),
                    "Serving cached contest list"
                );
                return Ok(cached.value);
            }
        }

        let contests: Vec<ContestInfo> = api
            .contest_list(false)
            .await?
            .iter()
            .map(convert::contest_info)
            .collect();

        if let Err(e) = store.replace_contests(&contests).await {
            tracing::warn!(error = %e, "Failed to store contest list, serving it unstored");
        }

        Ok(contests)
    }

    /// Contests that have not finished yet
    pub async fn upcoming_contests(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
    ) -> AppResult<Vec<ContestInfo>> {
        let contests = Self::list_contests(api, store).await?;

        Ok(contests
            .into_iter()
            .filter(|contest| !contest.phase.is_finished())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{
        codeforces::{CfContest, CfContestStandings, MockCodeforcesApi},
        db::store::MockCacheStore,
        models::ContestPhase,
        test_utils::{fixtures, MemoryStore},
    };

    #[tokio::test]
    async fn test_unfinished_contest_has_no_details() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .times(1)
            .returning(|_| Ok(vec![fixtures::cf_contest(1900, "CODING")]));
        api.expect_contest_standings().times(0);

        let mut store = MockCacheStore::new();
        store.expect_find_contest().returning(|_| Ok(None));
        store.expect_upsert_contest().times(1).returning(|_| Ok(()));
        store.expect_upsert_contest_details().times(0);

        let details = ContestService::get_contest(&api, &store, 100, 1900).await.unwrap();
        assert_eq!(details.info.phase, ContestPhase::Coding);
        assert!(details.rank.is_empty());
        assert!(details.problems.is_empty());
    }

    fn finished_contest_api(times: usize) -> MockCodeforcesApi {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .withf(|gym| !*gym)
            .times(times)
            .returning(|_| Ok(vec![fixtures::cf_contest(586, "FINISHED")]));
        api.expect_contest_standings()
            .withf(|id, from, count| *id == 586 && *from == 1 && *count == 50)
            .times(times)
            .returning(|_, _, _| {
                Ok(CfContestStandings {
                    contest: fixtures::cf_contest(586, "FINISHED"),
                    problems: vec![
                        fixtures::cf_problem(586, "A", Some(800), &[]),
                        fixtures::cf_problem(586, "B", Some(1300), &[]),
                    ],
                    rows: vec![
                        fixtures::rank_row(&["alice"], 1),
                        fixtures::rank_row(&["bob", "carol"], 2),
                    ],
                })
            });
        api
    }

    #[tokio::test]
    async fn test_finished_contest_is_cached() {
        let api = finished_contest_api(1);
        let store = MemoryStore::new();

        let fetched = ContestService::get_contest(&api, &store, 50, 586).await.unwrap();
        assert_eq!(fetched.problems.len(), 2);
        let ranks: Vec<(&str, i32)> = fetched
            .rank
            .iter()
            .map(|r| (r.handle.as_str(), r.position))
            .collect();
        assert_eq!(ranks, vec![("alice", 1), ("bob", 2), ("carol", 2)]);

        let cached = ContestService::get_contest(&api, &store, 50, 586).await.unwrap();
        assert_eq!(cached, fetched);
    }

    #[tokio::test]
    async fn test_stale_contest_is_refetched() {
        let api = finished_contest_api(2);
        let store = MemoryStore::new();

        ContestService::get_contest(&api, &store, 50, 586).await.unwrap();
        store.age_contests(Duration::days(1));
        ContestService::get_contest(&api, &store, 50, 586).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_contest_is_not_found() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list().times(2).returning(|_| Ok(Vec::new()));
        let store = MemoryStore::new();

        let result = ContestService::get_contest(&api, &store, 50, 42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_contest_lists() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .withf(|gym| !*gym)
            .times(1)
            .returning(|_| Ok(contest_list()));
        let store = MemoryStore::new();

        let all = ContestService::list_contests(&api, &store).await.unwrap();
        assert_eq!(all.len(), 3);

        let upcoming = ContestService::upcoming_contests(&api, &store).await.unwrap();
        let ids: Vec<i64> = upcoming.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2000, 1999]);
    }

    fn contest_list() -> Vec<CfContest> {
        vec![
            fixtures::cf_contest(2000, "BEFORE"),
            fixtures::cf_contest(1999, "CODING"),
            fixtures::cf_contest(1998, "FINISHED"),
        ]
    }

    #[tokio::test]
    async fn test_gym_contest_is_found() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .withf(|gym| !*gym)
            .times(1)
            .returning(|_| Ok(vec![fixtures::cf_contest(586, "FINISHED")]));
        api.expect_contest_list()
            .withf(|gym| *gym)
            .times(1)
            .returning(|_| Ok(vec![fixtures::cf_contest(102_345, "FINISHED")]));
        api.expect_contest_standings()
            .withf(|id, _, _| *id == 102_345)
            .times(1)
            .returning(|_, _, _| {
                Ok(CfContestStandings {
                    contest: fixtures::cf_contest(102_345, "FINISHED"),
                    problems: vec![fixtures::cf_problem(102_345, "A", None, &[])],
                    rows: vec![fixtures::rank_row(&["alice"], 1)],
                })
            });
        let store = MemoryStore::new();

        let details = ContestService::get_contest(&api, &store, 50, 102_345)
            .await
            .unwrap();
        assert_eq!(details.info.id, 102_345);
        assert_eq!(details.problems.len(), 1);
    }

    #[tokio::test]
    async fn test_details_write_failure_still_returns_contest() {
        let api = finished_contest_api(1);
        let mut store = MockCacheStore::new();
        store.expect_find_contest().returning(|_| Ok(None));
        store
            .expect_upsert_contest_details()
            .times(1)
            .returning(|_| Err(AppError::Database("connection reset".to_string())));

        let details = ContestService::get_contest(&api, &store, 50, 586).await.unwrap();
        assert_eq!(details.info.id, 586);
        assert_eq!(details.rank.len(), 3);
        assert_eq!(details.problems.len(), 2);
    }

    #[tokio::test]
    async fn test_info_write_failure_still_returns_contest() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .returning(|_| Ok(vec![fixtures::cf_contest(1900, "BEFORE")]));
        let mut store = MockCacheStore::new();
        store.expect_find_contest().returning(|_| Ok(None));
        store
            .expect_upsert_contest()
            .times(1)
            .returning(|_| Err(AppError::Database("connection reset".to_string())));

        let details = ContestService::get_contest(&api, &store, 50, 1900).await.unwrap();
        assert_eq!(details.info.phase, ContestPhase::Before);
        assert!(details.rank.is_empty());
    }

    #[tokio::test]
    async fn test_list_write_failure_still_returns_contests() {
        let mut api = MockCodeforcesApi::new();
        api.expect_contest_list()
            .withf(|gym| !*gym)
            .times(1)
            .returning(|_| Ok(contest_list()));
        let mut store = MockCacheStore::new();
        store.expect_find_contests().returning(|| Ok(None));
        store
            .expect_replace_contests()
            .times(1)
            .returning(|_| Err(AppError::Database("connection reset".to_string())));

        let contests = ContestService::list_contests(&api, &store).await.unwrap();
        let ids: Vec<i64> = contests.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2000, 1999, 1998]);
    }
}
