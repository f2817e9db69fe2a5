//! User service

use std::collections::HashSet;

use crate::{
    codeforces::{convert, CfSubmission, CodeforcesApi, ParticipantType},
    constants::{STALENESS_THRESHOLD_SECONDS, VERDICT_OK},
    db::CacheStore,
    error::AppResult,
    models::{ContestInfo, ProblemKey, RatedUser, User, UserProfile, UserSolution},
    utils::{age_of, is_fresh},
};

use super::{arena::ContestArena, statistics};

/// Solve records reduced from a user's submissions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecords {
    pub solutions: Vec<UserSolution>,
    pub contests: Vec<ContestInfo>,
}

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Cached user, refetched once it is stale
    pub async fn get_user(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        handle: &str,
    ) -> AppResult<User> {
        if let Some(cached) = store.find_user(handle).await? {
            if is_fresh(cached.updated_at, STALENESS_THRESHOLD_SECONDS) {
                tracing::debug!(handle, age = %age_of(cached.updated_at), "Serving cached user");
                return Ok(cached.value);
            }
        }

        let user = Self::fetch_user(api, handle).await?;

        if let Err(e) = store.upsert_user(&user).await {
            tracing::warn!(handle, error = %e, "Failed to store user, serving it unstored");
        }

        Ok(user)
    }

    /// User together with rank tiers and solve statistics
    pub async fn get_profile(
        api: &dyn CodeforcesApi,
        store: &dyn CacheStore,
        handle: &str,
    ) -> AppResult<UserProfile> {
        let user = Self::get_user(api, store, handle).await?;
        let summary = statistics::summarize(&user);

        Ok(UserProfile { user, summary })
    }

    /// Rated users straight from upstream with their tiers
    pub async fn list_rated(
        api: &dyn CodeforcesApi,
        active_only: bool,
        include_retired: bool,
    ) -> AppResult<Vec<RatedUser>> {
        let users = api.rated_list(active_only, include_retired).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let info = convert::user_info(user);
                RatedUser {
                    rank: statistics::classify_rank(info.rating),
                    max_rank: statistics::classify_rank(info.max_rating),
                    info,
                }
            })
            .collect())
    }

    async fn fetch_user(api: &dyn CodeforcesApi, handle: &str) -> AppResult<User> {
        let (info, submissions) =
            futures::try_join!(api.user_info(handle), api.user_status(handle))?;

        let mut arena = ContestArena::new(api);
        let records = Self::user_records(&mut arena, submissions).await?;

        tracing::info!(
            handle,
            solutions = records.solutions.len(),
            contests = records.contests.len(),
            "Fetched user from Codeforces"
        );

        Ok(User {
            info: convert::user_info(info),
            solutions: records.solutions,
            contests: records.contests,
        })
    }

    /// Reduce submissions to one solution per problem and the contests
    /// the user entered as a contestant
    ///
    /// Submissions are walked latest first, so the kept solution of a
    /// problem is its most recent accepted submission.
    pub async fn user_records(
        arena: &mut ContestArena<'_>,
        mut submissions: Vec<CfSubmission>,
    ) -> AppResult<UserRecords> {
        submissions.sort_by(|a, b| b.creation_time_seconds.cmp(&a.creation_time_seconds));

        let mut records = UserRecords::default();
        let mut solved: HashSet<ProblemKey> = HashSet::new();
        let mut entered: Vec<i64> = Vec::new();

        for submission in &submissions {
            let Some(contest_id) = submission.problem.contest_id else {
                continue;
            };
            let contest_flag = submission.author.participant_type == ParticipantType::Contestant;

            let accepted = submission.verdict.as_deref() == Some(VERDICT_OK);
            if accepted && solved.insert(ProblemKey::new(contest_id, &submission.problem.index)) {
                if let Some(problem) = arena.resolve(&submission.problem).await? {
                    records.solutions.push(UserSolution {
                        problem,
                        submission_time_seconds: submission.creation_time_seconds,
                        contest_flag,
                    });
                }
            }

            if contest_flag && !entered.contains(&contest_id) {
                entered.push(contest_id);
            }
        }

        for contest_id in entered {
            match arena.contest(contest_id).await? {
                Some(contest) => records.contests.push(contest),
                None => {
                    tracing::debug!(contest_id, "Skipping contest outside the contest lists")
                }
            }
        }

        Ok(records)
    }
}
