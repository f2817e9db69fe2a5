//! Test utilities: an in-memory cache store and payload fixtures

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    constants::{SYNC_CONTEST_LIST, SYNC_PROBLEMSET},
    db::{CacheStore, Cached},
    error::AppResult,
    models::{
        ContestDetails, ContestInfo, ContestRank, Problem, ProblemFilter, ProblemKey, User,
    },
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<String, Cached<User>>,
    contests: BTreeMap<i64, Cached<ContestInfo>>,
    ranks: HashMap<i64, Cached<Vec<ContestRank>>>,
    problems: BTreeMap<ProblemKey, Cached<Problem>>,
    synced: HashMap<&'static str, DateTime<Utc>>,
}

impl MemoryState {
    fn write_contest(&mut self, contest: &ContestInfo) {
        self.contests
            .insert(contest.id, Cached::new(contest.clone(), Utc::now()));
    }

    fn write_problems(&mut self, problems: &[Problem]) {
        for problem in problems {
            self.write_contest(&problem.contest);
            self.problems
                .insert(problem.key(), Cached::new(problem.clone(), Utc::now()));
        }
    }
}

/// [`CacheStore`] kept in memory, with helpers to age stored records
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age_user(&self, handle: &str, by: Duration) {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.get_mut(handle) {
            user.updated_at -= by;
        }
    }

    pub fn age_problems(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        for problem in state.problems.values_mut() {
            problem.updated_at -= by;
        }
    }

    pub fn age_contests(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        for contest in state.contests.values_mut() {
            contest.updated_at -= by;
        }
        for ranks in state.ranks.values_mut() {
            ranks.updated_at -= by;
        }
    }

    pub fn age_sync(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        for synced_at in state.synced.values_mut() {
            *synced_at -= by;
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn find_user(&self, handle: &str) -> AppResult<Option<Cached<User>>> {
        Ok(self.state.lock().unwrap().users.get(handle).cloned())
    }

    async fn upsert_user(&self, user: &User) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let problems: Vec<Problem> = user.solutions.iter().map(|s| s.problem.clone()).collect();
        state.write_problems(&problems);
        for contest in &user.contests {
            state.write_contest(contest);
        }
        state
            .users
            .insert(user.handle().to_string(), Cached::new(user.clone(), Utc::now()));
        Ok(())
    }

    async fn find_problem(&self, key: &ProblemKey) -> AppResult<Option<Cached<Problem>>> {
        Ok(self.state.lock().unwrap().problems.get(key).cloned())
    }

    async fn find_problems(
        &self,
        filter: &ProblemFilter,
    ) -> AppResult<Option<Cached<Vec<Problem>>>> {
        let state = self.state.lock().unwrap();
        let Some(&synced_at) = state.synced.get(SYNC_PROBLEMSET) else {
            return Ok(None);
        };

        let mut problems: Vec<Problem> = state
            .problems
            .values()
            .map(|cached| cached.value.clone())
            .filter(|problem| filter.matches(problem))
            .collect();
        problems.sort_by_key(|problem| (Reverse(problem.contest_id()), problem.index.clone()));

        Ok(Some(Cached::new(problems, synced_at)))
    }

    async fn upsert_problems(&self, problems: &[Problem]) -> AppResult<()> {
        self.state.lock().unwrap().write_problems(problems);
        Ok(())
    }

    async fn replace_problemset(&self, problems: &[Problem]) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.write_problems(problems);
        state.synced.insert(SYNC_PROBLEMSET, Utc::now());
        Ok(())
    }

    async fn find_contest(&self, id: i64) -> AppResult<Option<Cached<ContestDetails>>> {
        let state = self.state.lock().unwrap();
        let Some(contest) = state.contests.get(&id) else {
            return Ok(None);
        };

        if !contest.value.phase.is_finished() {
            let details = ContestDetails::pending(contest.value.clone());
            return Ok(Some(Cached::new(details, contest.updated_at)));
        }

        let Some(ranks) = state.ranks.get(&id) else {
            return Ok(None);
        };

        let problems = state
            .problems
            .values()
            .filter(|cached| cached.value.contest_id() == id)
            .map(|cached| cached.value.clone())
            .collect();

        let details = ContestDetails {
            info: contest.value.clone(),
            rank: ranks.value.clone(),
            problems,
        };
        Ok(Some(Cached::new(details, ranks.updated_at)))
    }

    async fn find_contests(&self) -> AppResult<Option<Cached<Vec<ContestInfo>>>> {
        let state = self.state.lock().unwrap();
        let Some(&synced_at) = state.synced.get(SYNC_CONTEST_LIST) else {
            return Ok(None);
        };

        let contests = state
            .contests
            .values()
            .rev()
            .map(|cached| cached.value.clone())
            .collect();

        Ok(Some(Cached::new(contests, synced_at)))
    }

    async fn upsert_contest(&self, contest: &ContestInfo) -> AppResult<()> {
        self.state.lock().unwrap().write_contest(contest);
        Ok(())
    }

    async fn replace_contests(&self, contests: &[ContestInfo]) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        for contest in contests {
            state.write_contest(contest);
        }
        state.synced.insert(SYNC_CONTEST_LIST, Utc::now());
        Ok(())
    }

    async fn upsert_contest_details(&self, details: &ContestDetails) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.write_contest(&details.info);
        state.write_problems(&details.problems);
        state
            .ranks
            .insert(details.info.id, Cached::new(details.rank.clone(), Utc::now()));
        Ok(())
    }
}

/// Builders for upstream payloads and domain models
pub mod fixtures {
    use crate::{
        codeforces::{
            CfContest, CfMember, CfParty, CfProblem, CfRankListRow, CfSubmission, CfUser,
            ParticipantType,
        },
        models::{
            ContestInfo, ContestPhase, ContestType, Problem, User, UserInfo, UserSolution,
        },
    };

    pub fn cf_contest(id: i64, phase: &str) -> CfContest {
        CfContest {
            id,
            name: format!("Codeforces Round #{}", id),
            contest_type: ContestType::Cf,
            phase: ContestPhase::from_str(phase).expect("known phase"),
            start_time_seconds: Some(1_600_000_000 + id),
        }
    }

    pub fn cf_problem(
        contest_id: i64,
        index: &str,
        rating: Option<i32>,
        tags: &[&str],
    ) -> CfProblem {
        CfProblem {
            contest_id: Some(contest_id),
            index: index.to_string(),
            name: format!("Problem {}{}", contest_id, index),
            rating,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub fn cf_user(handle: &str, rating: i32, max_rating: i32) -> CfUser {
        CfUser {
            handle: handle.to_string(),
            first_name: Some("Test".to_string()),
            last_name: None,
            country: None,
            city: None,
            organization: None,
            rating: Some(rating),
            max_rating: Some(max_rating),
            registration_time_seconds: 1_500_000_000,
            title_photo: format!("https://userpic.codeforces.org/{}.jpg", handle),
        }
    }

    pub fn submission(
        handle: &str,
        contest_id: i64,
        index: &str,
        time: i64,
        verdict: &str,
        participant_type: ParticipantType,
    ) -> CfSubmission {
        CfSubmission {
            creation_time_seconds: time,
            problem: cf_problem(contest_id, index, None, &[]),
            author: CfParty {
                members: vec![CfMember {
                    handle: handle.to_string(),
                }],
                participant_type,
            },
            verdict: Some(verdict.to_string()),
        }
    }

    pub fn rank_row(handles: &[&str], rank: i32) -> CfRankListRow {
        CfRankListRow {
            party: CfParty {
                members: handles
                    .iter()
                    .map(|handle| CfMember {
                        handle: handle.to_string(),
                    })
                    .collect(),
                participant_type: ParticipantType::Contestant,
            },
            rank,
        }
    }

    pub fn contest_info(id: i64, phase: ContestPhase) -> ContestInfo {
        ContestInfo {
            id,
            name: format!("Codeforces Round #{}", id),
            contest_type: ContestType::Cf,
            phase,
            start_time_seconds: Some(1_600_000_000 + id),
        }
    }

    pub fn problem(
        contest_id: i64,
        index: &str,
        difficulty: Option<i32>,
        tags: &[&str],
    ) -> Problem {
        Problem {
            contest: contest_info(contest_id, ContestPhase::Finished),
            index: index.to_string(),
            name: format!("Problem {}{}", contest_id, index),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            difficulty,
        }
    }

    pub fn solution(problem: Problem, time: i64) -> UserSolution {
        UserSolution {
            problem,
            submission_time_seconds: time,
            contest_flag: false,
        }
    }

    pub fn user(handle: &str, rating: i32, max_rating: i32) -> User {
        User {
            info: UserInfo {
                handle: handle.to_string(),
                name: String::new(),
                country: None,
                city: None,
                organization: None,
                rating,
                max_rating,
                registration_time_seconds: 1_500_000_000,
                photo_link: String::new(),
            },
            solutions: Vec::new(),
            contests: Vec::new(),
        }
    }
}
