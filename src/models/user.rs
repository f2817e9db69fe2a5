//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ContestInfo, Problem, ProblemRow, Statistics};

/// Profile fields of a user as reported by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub handle: String,
    pub name: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub organization: Option<String>,
    pub rating: i32,
    pub max_rating: i32,
    pub registration_time_seconds: i64,
    pub photo_link: String,
}

/// Accepted solution of a problem; at most one is kept per problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSolution {
    pub problem: Problem,
    pub submission_time_seconds: i64,
    /// Submitted as a contest participant rather than in practice
    pub contest_flag: bool,
}

/// User with solve records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub info: UserInfo,
    pub solutions: Vec<UserSolution>,
    /// Contests the user took part in as a contestant
    pub contests: Vec<ContestInfo>,
}

impl User {
    pub fn handle(&self) -> &str {
        &self.info.handle
    }
}

/// Rating tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankTier {
    Newbie,
    Pupil,
    Specialist,
    Expert,
    #[serde(rename = "Candidate Master")]
    CandidateMaster,
    Master,
    #[serde(rename = "International Master")]
    InternationalMaster,
    Grandmaster,
    #[serde(rename = "International Grandmaster")]
    InternationalGrandmaster,
    #[serde(rename = "Legendary Grandmaster")]
    LegendaryGrandmaster,
}

/// Fields derived from a user's records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub rank: RankTier,
    pub max_rank: RankTier,
    pub solve_count: usize,
    pub contest_count: usize,
    #[serde(flatten)]
    pub statistics: Statistics,
}

/// A user together with its derived summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(flatten)]
    pub summary: UserSummary,
}

/// Entry of the rated user list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedUser {
    #[serde(flatten)]
    pub info: UserInfo,
    pub rank: RankTier,
    pub max_rank: RankTier,
}

/// User database row
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub handle: String,
    pub name: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub organization: Option<String>,
    pub rating: i32,
    pub max_rating: i32,
    pub registration_time_seconds: i64,
    pub photo_link: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserInfo {
    fn from(row: UserRow) -> Self {
        UserInfo {
            handle: row.handle,
            name: row.name,
            country: row.country,
            city: row.city,
            organization: row.organization,
            rating: row.rating,
            max_rating: row.max_rating,
            registration_time_seconds: row.registration_time_seconds,
            photo_link: row.photo_link,
        }
    }
}

/// Solution database row, joined with its problem
#[derive(Debug, Clone, FromRow)]
pub struct SolutionRow {
    pub submission_time_seconds: i64,
    pub contest_flag: bool,
    #[sqlx(flatten)]
    pub problem: ProblemRow,
}
