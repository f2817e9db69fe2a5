//! Wire types of the Codeforces API
//!
//! Only the fields this service reads are declared; everything else in the
//! upstream payloads is ignored.

use serde::Deserialize;

use crate::{
    constants::UPSTREAM_STATUS_OK,
    error::{AppError, AppResult},
    models::{ContestPhase, ContestType},
};

/// `{status, comment?, result?}` envelope wrapping every response
#[derive(Debug, Deserialize)]
pub struct CfResponse<T> {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<T>,
}

impl<T> CfResponse<T> {
    /// Unwrap the envelope into its result or an upstream error
    pub fn into_result(self) -> AppResult<T> {
        if self.status != UPSTREAM_STATUS_OK {
            return Err(AppError::Upstream(
                self.comment
                    .unwrap_or_else(|| format!("request failed with status {}", self.status)),
            ));
        }

        self.result
            .ok_or_else(|| AppError::Upstream("missing result".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfUser {
    pub handle: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub organization: Option<String>,
    /// Absent for users who never took part in a rated contest
    pub rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub registration_time_seconds: i64,
    pub title_photo: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfProblem {
    pub contest_id: Option<i64>,
    pub index: String,
    pub name: String,
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfContest {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub contest_type: ContestType,
    pub phase: ContestPhase,
    pub start_time_seconds: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CfMember {
    pub handle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantType {
    Contestant,
    Practice,
    Virtual,
    Manager,
    OutOfCompetition,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfParty {
    pub members: Vec<CfMember>,
    pub participant_type: ParticipantType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfSubmission {
    pub creation_time_seconds: i64,
    pub problem: CfProblem,
    pub author: CfParty,
    /// Absent while the submission is still queued
    pub verdict: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CfRankListRow {
    pub party: CfParty,
    pub rank: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CfContestStandings {
    pub contest: CfContest,
    pub problems: Vec<CfProblem>,
    pub rows: Vec<CfRankListRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CfProblemSet {
    pub problems: Vec<CfProblem>,
}
