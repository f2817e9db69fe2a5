//! Per-operation contest lookup

use std::collections::HashMap;

use crate::{
    codeforces::{convert, CfProblem, CodeforcesApi},
    error::AppResult,
    models::{ContestInfo, Problem},
};

/// Contest lists loaded at most once per operation, indexed by id
///
/// Resolves the owning contest of upstream problems. The regular list is
/// loaded on first use; the gym list only once an id is missing from it.
/// Built for a single request and dropped with it.
pub struct ContestArena<'a> {
    api: &'a dyn CodeforcesApi,
    contests: HashMap<i64, ContestInfo>,
    loaded: bool,
    gym_loaded: bool,
}

impl<'a> ContestArena<'a> {
    pub fn new(api: &'a dyn CodeforcesApi) -> Self {
        Self {
            api,
            contests: HashMap::new(),
            loaded: false,
            gym_loaded: false,
        }
    }

    async fn load(&mut self, gym: bool) -> AppResult<()> {
        let contests = self.api.contest_list(gym).await?;
        tracing::debug!(gym, count = contests.len(), "Loaded contest list");

        self.contests.extend(
            contests
                .iter()
                .map(|contest| (contest.id, convert::contest_info(contest))),
        );
        Ok(())
    }

    async fn lookup(&mut self, id: i64) -> AppResult<Option<&ContestInfo>> {
        if !self.loaded {
            self.load(false).await?;
            self.loaded = true;
        }
        if !self.gym_loaded && !self.contests.contains_key(&id) {
            self.load(true).await?;
            self.gym_loaded = true;
        }

        Ok(self.contests.get(&id))
    }

    /// Contest by id; `None` if neither contest list has it
    pub async fn contest(&mut self, id: i64) -> AppResult<Option<ContestInfo>> {
        Ok(self.lookup(id).await?.cloned())
    }

    /// Attach the owning contest to an upstream problem
    pub async fn resolve(&mut self, problem: &CfProblem) -> AppResult<Option<Problem>> {
        let Some(contest_id) = problem.contest_id else {
            return Ok(None);
        };

        let resolved = self
            .lookup(contest_id)
            .await?
            .map(|contest| convert::problem(problem, contest));

        if resolved.is_none() {
            tracing::debug!(
                contest_id,
                index = %problem.index,
                "Skipping problem outside the contest lists"
            );
        }
        Ok(resolved)
    }

    /// Resolve every problem, dropping those without a known contest
    pub async fn resolve_all(&mut self, problems: &[CfProblem]) -> AppResult<Vec<Problem>> {
        let mut resolved = Vec::with_capacity(problems.len());
        for problem in problems {
            if let Some(problem) = self.resolve(problem).await? {
                resolved.push(problem);
            }
        }
        Ok(resolved)
    }
}
