//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    constants::FALLBACK_LEVEL,
    error::{AppError, AppResult},
};

use super::{
    contest::{parse_contest_phase, parse_contest_type},
    ContestInfo, Statistics,
};

/// Problem of a contest, unique by `(contest id, index)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub contest: ContestInfo,
    pub index: String,
    pub name: String,
    pub tags: Vec<String>,
    pub difficulty: Option<i32>,
}

impl Problem {
    pub fn contest_id(&self) -> i64 {
        self.contest.id
    }

    /// Natural key of the problem, e.g. `586-A`
    pub fn key(&self) -> ProblemKey {
        ProblemKey {
            contest_id: self.contest.id,
            index: self.index.clone(),
        }
    }

    /// Single-letter grouping derived from the index
    pub fn level(&self) -> String {
        level_of(&self.index)
    }
}

/// Level of a problem index: its first letter uppercased, or `"0"`
pub fn level_of(index: &str) -> String {
    match index.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase().to_string(),
        _ => FALLBACK_LEVEL.to_string(),
    }
}

/// `{contestId}-{index}` identifier of a problem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemKey {
    pub contest_id: i64,
    pub index: String,
}

impl ProblemKey {
    pub fn new(contest_id: i64, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }

    /// Parse a key of the form `586-A`
    pub fn parse(key: &str) -> AppResult<Self> {
        let (contest, index) = key
            .split_once('-')
            .ok_or_else(|| AppError::InvalidInput(format!("Malformed problem key: {}", key)))?;

        let contest_id = contest
            .parse::<i64>()
            .map_err(|_| AppError::InvalidInput(format!("Malformed contest id in key: {}", key)))?;

        if index.is_empty() {
            return Err(AppError::InvalidInput(format!("Missing problem index in key: {}", key)));
        }

        Ok(Self::new(contest_id, index))
    }
}

impl std::fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.contest_id, self.index)
    }
}

/// Problemset filter; every bound is inclusive
///
/// A problem without difficulty fails any difficulty bound, and a problem
/// whose contest has no start time fails any time bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemFilter {
    /// Uppercase single letter
    pub level_from: Option<String>,
    /// Uppercase single letter
    pub level_to: Option<String>,
    pub difficulty_from: Option<i32>,
    pub difficulty_to: Option<i32>,
    pub time_seconds_from: Option<i64>,
    pub time_seconds_to: Option<i64>,
    pub tags: Vec<String>,
    /// Require any of `tags` instead of all of them
    pub combine_tags_by_or: bool,
}

impl ProblemFilter {
    pub fn matches(&self, problem: &Problem) -> bool {
        let level = problem.level();
        if self.level_from.as_ref().is_some_and(|from| level < *from) {
            return false;
        }
        if self.level_to.as_ref().is_some_and(|to| level > *to) {
            return false;
        }

        if !within(problem.difficulty, self.difficulty_from, self.difficulty_to) {
            return false;
        }
        if !within(
            problem.contest.start_time_seconds,
            self.time_seconds_from,
            self.time_seconds_to,
        ) {
            return false;
        }

        if self.tags.is_empty() {
            return true;
        }
        let has_tag = |tag: &String| problem.tags.contains(tag);
        if self.combine_tags_by_or {
            self.tags.iter().any(has_tag)
        } else {
            self.tags.iter().all(has_tag)
        }
    }
}

fn within<T: PartialOrd>(value: Option<T>, from: Option<T>, to: Option<T>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    match value {
        Some(value) => {
            from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
        }
        None => false,
    }
}

/// Filtered problem list with its histograms
#[derive(Debug, Clone, Serialize)]
pub struct Problemset {
    pub problems: Vec<Problem>,
    #[serde(flatten)]
    pub statistics: Statistics,
}

/// Problem database row, joined with its owning contest
#[derive(Debug, Clone, FromRow)]
pub struct ProblemRow {
    pub contest_id: i64,
    pub problem_index: String,
    pub name: String,
    pub tags: Vec<String>,
    pub difficulty: Option<i32>,
    pub updated_at: DateTime<Utc>,
    pub contest_name: String,
    pub contest_type: String,
    pub contest_phase: String,
    pub contest_start_time_seconds: Option<i64>,
}

impl TryFrom<ProblemRow> for Problem {
    type Error = AppError;

    fn try_from(row: ProblemRow) -> AppResult<Self> {
        Ok(Problem {
            contest: ContestInfo {
                id: row.contest_id,
                name: row.contest_name,
                contest_type: parse_contest_type(&row.contest_type)?,
                phase: parse_contest_phase(&row.contest_phase)?,
                start_time_seconds: row.contest_start_time_seconds,
            },
            index: row.problem_index,
            name: row.name,
            tags: row.tags,
            difficulty: row.difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        let key = ProblemKey::parse("586-A").unwrap();
        assert_eq!(key, ProblemKey::new(586, "A"));
        assert_eq!(key.to_string(), "586-A");

        let key = ProblemKey::parse("1790-F2").unwrap();
        assert_eq!(key.index, "F2");
    }

    #[test]
    fn test_parse_key_rejects_malformed() {
        assert!(ProblemKey::parse("586A").is_err());
        assert!(ProblemKey::parse("abc-A").is_err());
        assert!(ProblemKey::parse("586-").is_err());
    }

    fn problem(index: &str, difficulty: Option<i32>, tags: &[&str], start: Option<i64>) -> Problem {
        Problem {
            contest: ContestInfo {
                id: 1,
                name: "Round".to_string(),
                contest_type: crate::models::ContestType::Cf,
                phase: crate::models::ContestPhase::Finished,
                start_time_seconds: start,
            },
            index: index.to_string(),
            name: "Problem".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            difficulty,
        }
    }

    #[test]
    fn test_filter_levels_and_difficulty() {
        let filter = ProblemFilter {
            level_from: Some("B".to_string()),
            level_to: Some("D".to_string()),
            difficulty_from: Some(1200),
            difficulty_to: Some(1600),
            ..Default::default()
        };

        assert!(filter.matches(&problem("B", Some(1200), &[], None)));
        assert!(filter.matches(&problem("d2", Some(1600), &[], None)));
        assert!(!filter.matches(&problem("A", Some(1400), &[], None)));
        assert!(!filter.matches(&problem("E", Some(1400), &[], None)));
        assert!(!filter.matches(&problem("C", Some(1700), &[], None)));
        assert!(!filter.matches(&problem("C", None, &[], None)));
    }

    #[test]
    fn test_filter_time_range() {
        let filter = ProblemFilter {
            time_seconds_from: Some(1_000),
            ..Default::default()
        };

        assert!(filter.matches(&problem("A", None, &[], Some(1_000))));
        assert!(!filter.matches(&problem("A", None, &[], Some(999))));
        assert!(!filter.matches(&problem("A", None, &[], None)));
    }

    #[test]
    fn test_filter_tags_and_or() {
        let both = problem("A", None, &["dp", "greedy"], None);
        let dp_only = problem("A", None, &["dp"], None);

        let mut filter = ProblemFilter {
            tags: vec!["dp".to_string(), "greedy".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&both));
        assert!(!filter.matches(&dp_only));

        filter.combine_tags_by_or = true;
        assert!(filter.matches(&dp_only));
        assert!(!filter.matches(&problem("A", None, &["math"], None)));
    }

    #[test]
    fn test_level_of() {
        assert_eq!(level_of("A"), "A");
        assert_eq!(level_of("c1"), "C");
        assert_eq!(level_of("F2"), "F");
        assert_eq!(level_of("1"), "0");
        assert_eq!(level_of(""), "0");
    }
}
