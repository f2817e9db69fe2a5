//! Codeforces upstream access
//!
//! The [`CodeforcesApi`] trait is the seam the services depend on; the
//! HTTP implementation lives in [`client`].

pub mod client;
pub mod convert;
pub mod types;

use async_trait::async_trait;

use crate::error::AppResult;

pub use client::HttpCodeforcesClient;
pub use types::*;

/// One method per upstream API call, each returning the unwrapped result
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeforcesApi: Send + Sync {
    /// `user.info` for a single handle
    async fn user_info(&self, handle: &str) -> AppResult<CfUser>;

    /// `user.status`: every submission of the user
    async fn user_status(&self, handle: &str) -> AppResult<Vec<CfSubmission>>;

    /// `user.ratedList`
    async fn rated_list(&self, active_only: bool, include_retired: bool) -> AppResult<Vec<CfUser>>;

    /// `problemset.problems`
    async fn problemset_problems(&self) -> AppResult<CfProblemSet>;

    /// `contest.list`; gym contests only when `gym` is set
    async fn contest_list(&self, gym: bool) -> AppResult<Vec<CfContest>>;

    /// `contest.standings` starting at row `from` (1-based)
    async fn contest_standings(
        &self,
        contest_id: i64,
        from: u32,
        count: u32,
    ) -> AppResult<CfContestStandings>;
}
