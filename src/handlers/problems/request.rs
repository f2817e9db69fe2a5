//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    models::ProblemFilter,
    utils::{split_list, validate_level},
};

/// Problemset query; every bound is inclusive
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProblemsetQuery {
    #[validate(custom(function = "validate_level"))]
    pub level_from: Option<String>,

    #[validate(custom(function = "validate_level"))]
    pub level_to: Option<String>,

    #[validate(range(min = 0))]
    pub difficulty_from: Option<i32>,

    #[validate(range(min = 0))]
    pub difficulty_to: Option<i32>,

    #[validate(range(min = 0))]
    pub time_seconds_from: Option<i64>,

    #[validate(range(min = 0))]
    pub time_seconds_to: Option<i64>,

    /// Comma-separated tag list
    pub tags: Option<String>,

    /// Match any requested tag instead of all of them
    #[serde(default)]
    pub should_combine_tags_by_or: bool,
}

impl ProblemsetQuery {
    pub fn into_filter(self) -> ProblemFilter {
        ProblemFilter {
            level_from: self.level_from.map(|level| level.to_ascii_uppercase()),
            level_to: self.level_to.map(|level| level.to_ascii_uppercase()),
            difficulty_from: self.difficulty_from,
            difficulty_to: self.difficulty_to,
            time_seconds_from: self.time_seconds_from,
            time_seconds_to: self.time_seconds_to,
            tags: self.tags.as_deref().map(split_list).unwrap_or_default(),
            combine_tags_by_or: self.should_combine_tags_by_or,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_filter() {
        let query = ProblemsetQuery {
            level_from: Some("b".to_string()),
            difficulty_to: Some(1600),
            tags: Some("dp,greedy".to_string()),
            should_combine_tags_by_or: true,
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        let filter = query.into_filter();
        assert_eq!(filter.level_from.as_deref(), Some("B"));
        assert_eq!(filter.difficulty_to, Some(1600));
        assert_eq!(filter.tags, vec!["dp", "greedy"]);
        assert!(filter.combine_tags_by_or);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let query = ProblemsetQuery {
            level_to: Some("AB".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = ProblemsetQuery {
            difficulty_from: Some(-1),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
