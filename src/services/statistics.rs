//! Rank tiers and problem histograms

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    DifficultyKey, Histogram, Problem, RankTier, Statistics, User, UserSolution, UserSummary,
};

/// Exclusive upper rating bound of each tier, ascending
const RANK_THRESHOLDS: [(i32, RankTier); 9] = [
    (1200, RankTier::Newbie),
    (1400, RankTier::Pupil),
    (1600, RankTier::Specialist),
    (1900, RankTier::Expert),
    (2100, RankTier::CandidateMaster),
    (2300, RankTier::Master),
    (2400, RankTier::InternationalMaster),
    (2600, RankTier::Grandmaster),
    (3000, RankTier::InternationalGrandmaster),
];

/// Tier of a rating: the first threshold the rating is strictly below
pub fn classify_rank(rating: i32) -> RankTier {
    RANK_THRESHOLDS
        .iter()
        .find(|(bound, _)| rating < *bound)
        .map_or(RankTier::LegendaryGrandmaster, |(_, tier)| *tier)
}

/// Histograms over the solved problems of a user
pub fn derive_statistics(solutions: &[UserSolution]) -> Statistics {
    tally(solutions.iter().map(|solution| &solution.problem))
}

/// Count problems by level, difficulty and tag
///
/// Levels and difficulties come out key-ascending. Tags come out by count
/// descending; equal counts keep the order in which the tag was first seen.
pub fn tally<'a>(problems: impl IntoIterator<Item = &'a Problem>) -> Statistics {
    let mut levels: BTreeMap<String, u32> = BTreeMap::new();
    let mut difficulties: BTreeMap<DifficultyKey, u32> = BTreeMap::new();
    let mut tags: Vec<(String, u32)> = Vec::new();
    let mut tag_slots: HashMap<String, usize> = HashMap::new();

    for problem in problems {
        *levels.entry(problem.level()).or_default() += 1;
        *difficulties
            .entry(DifficultyKey::from(problem.difficulty))
            .or_default() += 1;

        for tag in &problem.tags {
            match tag_slots.get(tag) {
                Some(&slot) => tags[slot].1 += 1,
                None => {
                    tag_slots.insert(tag.clone(), tags.len());
                    tags.push((tag.clone(), 1));
                }
            }
        }
    }

    // stable: ties stay in first-seen order
    tags.sort_by(|a, b| b.1.cmp(&a.1));

    Statistics {
        levels: Histogram::from_entries(levels.into_iter().collect()),
        difficulties: Histogram::from_entries(difficulties.into_iter().collect()),
        tags: Histogram::from_entries(tags),
    }
}

/// Derived fields of a user profile
pub fn summarize(user: &User) -> UserSummary {
    UserSummary {
        rank: classify_rank(user.info.rating),
        max_rank: classify_rank(user.info.max_rating),
        solve_count: user.solutions.len(),
        contest_count: user.contests.len(),
        statistics: derive_statistics(&user.solutions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_rank_boundaries() {
        let cases = [
            (1199, RankTier::Newbie),
            (1200, RankTier::Pupil),
            (1399, RankTier::Pupil),
            (1400, RankTier::Specialist),
            (1599, RankTier::Specialist),
            (1600, RankTier::Expert),
            (1899, RankTier::Expert),
            (1900, RankTier::CandidateMaster),
            (2099, RankTier::CandidateMaster),
            (2100, RankTier::Master),
            (2299, RankTier::Master),
            (2300, RankTier::InternationalMaster),
            (2399, RankTier::InternationalMaster),
            (2400, RankTier::Grandmaster),
            (2599, RankTier::Grandmaster),
            (2600, RankTier::InternationalGrandmaster),
            (2999, RankTier::InternationalGrandmaster),
            (3000, RankTier::LegendaryGrandmaster),
        ];

        for (rating, tier) in cases {
            assert_eq!(classify_rank(rating), tier, "rating {}", rating);
        }
        assert_eq!(classify_rank(0), RankTier::Newbie);
        assert_eq!(classify_rank(-50), RankTier::Newbie);
        assert_eq!(classify_rank(4000), RankTier::LegendaryGrandmaster);
    }

    #[test]
    fn test_rank_is_monotonic() {
        let mut previous = classify_rank(-100);
        for rating in -99..=4000 {
            let tier = classify_rank(rating);
            assert!(tier >= previous, "tier dropped at rating {}", rating);
            previous = tier;
        }
    }

    #[test]
    fn test_empty_solutions() {
        let statistics = derive_statistics(&[]);
        assert!(statistics.levels.is_empty());
        assert!(statistics.difficulties.is_empty());
        assert!(statistics.tags.is_empty());
    }

    #[test]
    fn test_statistics_counts_and_order() {
        let solutions = vec![
            fixtures::solution(fixtures::problem(1, "C", Some(1500), &["math", "dp"]), 10),
            fixtures::solution(fixtures::problem(2, "a", Some(800), &["greedy"]), 20),
            fixtures::solution(fixtures::problem(3, "A", None, &["greedy", "dp"]), 30),
            fixtures::solution(fixtures::problem(4, "1", Some(800), &[]), 40),
        ];

        let statistics = derive_statistics(&solutions);

        let levels: Vec<_> = statistics.levels.keys().cloned().collect();
        assert_eq!(levels, vec!["0", "A", "C"]);
        assert_eq!(statistics.levels.get(&"A".to_string()), Some(2));

        let difficulties: Vec<_> = statistics.difficulties.keys().copied().collect();
        assert_eq!(
            difficulties,
            vec![
                DifficultyKey::Rated(800),
                DifficultyKey::Rated(1500),
                DifficultyKey::Unknown
            ]
        );

        // dp and greedy tie at 2; dp was seen first
        let tags: Vec<_> = statistics.tags.entries().to_vec();
        assert_eq!(
            tags,
            vec![
                ("dp".to_string(), 2),
                ("greedy".to_string(), 2),
                ("math".to_string(), 1)
            ]
        );

        assert_eq!(statistics.levels.total(), solutions.len() as u32);
        assert_eq!(statistics.difficulties.total(), solutions.len() as u32);
        assert_eq!(statistics.tags.total(), 5);
    }

    #[test]
    fn test_statistics_serialize_in_order() {
        let problems = vec![
            fixtures::problem(1, "B", None, &["implementation"]),
            fixtures::problem(2, "B", Some(1200), &["math", "implementation"]),
        ];

        let json = serde_json::to_string(&tally(&problems)).unwrap();
        assert_eq!(
            json,
            r#"{"levels":{"B":2},"difficulties":{"1200":1,"Unknown":1},"tags":{"implementation":2,"math":1}}"#
        );
    }

    #[test]
    fn test_summarize() {
        let mut user = fixtures::user("tourist", 3800, 3979);
        user.solutions = vec![fixtures::solution(fixtures::problem(1, "A", Some(800), &[]), 1)];
        user.contests = vec![fixtures::contest_info(1, crate::models::ContestPhase::Finished)];

        let summary = summarize(&user);
        assert_eq!(summary.rank, RankTier::LegendaryGrandmaster);
        assert_eq!(summary.max_rank, RankTier::LegendaryGrandmaster);
        assert_eq!(summary.solve_count, 1);
        assert_eq!(summary.contest_count, 1);
    }
}
