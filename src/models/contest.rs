//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

use super::Problem;

/// Contest scoring type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestType {
    #[serde(rename = "CF")]
    Cf,
    #[serde(rename = "IOI")]
    Ioi,
    #[serde(rename = "ICPC")]
    Icpc,
}

impl ContestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cf => "CF",
            Self::Ioi => "IOI",
            Self::Icpc => "ICPC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CF" => Some(Self::Cf),
            "IOI" => Some(Self::Ioi),
            "ICPC" => Some(Self::Icpc),
            _ => None,
        }
    }
}

/// Contest lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
}

impl ContestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::Coding => "CODING",
            Self::PendingSystemTest => "PENDING_SYSTEM_TEST",
            Self::SystemTest => "SYSTEM_TEST",
            Self::Finished => "FINISHED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BEFORE" => Some(Self::Before),
            "CODING" => Some(Self::Coding),
            "PENDING_SYSTEM_TEST" => Some(Self::PendingSystemTest),
            "SYSTEM_TEST" => Some(Self::SystemTest),
            "FINISHED" => Some(Self::Finished),
            _ => None,
        }
    }

    /// Standings and problem lists are only authoritative once finished
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight contest description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestInfo {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub contest_type: ContestType,
    pub phase: ContestPhase,
    pub start_time_seconds: Option<i64>,
}

/// One standings entry (team contests yield one entry per member)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestRank {
    pub handle: String,
    pub position: i32,
}

/// Contest with standings and problems
///
/// `rank` and `problems` stay empty until the contest is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestDetails {
    #[serde(flatten)]
    pub info: ContestInfo,
    pub rank: Vec<ContestRank>,
    pub problems: Vec<Problem>,
}

impl ContestDetails {
    /// Details of a contest whose standings are not final yet
    pub fn pending(info: ContestInfo) -> Self {
        Self {
            info,
            rank: Vec::new(),
            problems: Vec::new(),
        }
    }
}

/// Contest database row
#[derive(Debug, Clone, FromRow)]
pub struct ContestRow {
    pub id: i64,
    pub name: String,
    pub contest_type: String,
    pub phase: String,
    pub start_time_seconds: Option<i64>,
    pub updated_at: DateTime<Utc>,
    pub details_updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ContestRow> for ContestInfo {
    type Error = AppError;

    fn try_from(row: ContestRow) -> AppResult<Self> {
        Ok(ContestInfo {
            id: row.id,
            name: row.name,
            contest_type: parse_contest_type(&row.contest_type)?,
            phase: parse_contest_phase(&row.phase)?,
            start_time_seconds: row.start_time_seconds,
        })
    }
}

/// Contest rank database row
#[derive(Debug, Clone, FromRow)]
pub struct ContestRankRow {
    pub user_handle: String,
    pub position: i32,
}

impl From<ContestRankRow> for ContestRank {
    fn from(row: ContestRankRow) -> Self {
        ContestRank {
            handle: row.user_handle,
            position: row.position,
        }
    }
}

pub(crate) fn parse_contest_type(s: &str) -> AppResult<ContestType> {
    ContestType::from_str(s)
        .ok_or_else(|| AppError::Database(format!("Unknown contest type stored: {}", s)))
}

pub(crate) fn parse_contest_phase(s: &str) -> AppResult<ContestPhase> {
    ContestPhase::from_str(s)
        .ok_or_else(|| AppError::Database(format!("Unknown contest phase stored: {}", s)))
}
