//! Mapping from upstream payloads to domain models

use crate::models::{ContestDetails, ContestInfo, ContestRank, Problem, UserInfo};

use super::types::{CfContest, CfContestStandings, CfProblem, CfRankListRow, CfUser};

/// `first last`, whichever half exists, or an empty string
pub fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    let first = first_name.unwrap_or_default().trim();
    let last = last_name.unwrap_or_default().trim();

    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{} {}", first, last),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}

pub fn user_info(user: CfUser) -> UserInfo {
    UserInfo {
        name: display_name(user.first_name.as_deref(), user.last_name.as_deref()),
        handle: user.handle,
        country: user.country,
        city: user.city,
        organization: user.organization,
        rating: user.rating.unwrap_or_default(),
        max_rating: user.max_rating.unwrap_or_default(),
        registration_time_seconds: user.registration_time_seconds,
        photo_link: user.title_photo,
    }
}

pub fn contest_info(contest: &CfContest) -> ContestInfo {
    ContestInfo {
        id: contest.id,
        name: contest.name.clone(),
        contest_type: contest.contest_type,
        phase: contest.phase,
        start_time_seconds: contest.start_time_seconds,
    }
}

pub fn problem(problem: &CfProblem, contest: &ContestInfo) -> Problem {
    Problem {
        contest: contest.clone(),
        index: problem.index.clone(),
        name: problem.name.clone(),
        tags: problem.tags.clone(),
        difficulty: problem.rating,
    }
}

/// Flatten standings rows; every team member gets the row's position
pub fn contest_ranks(rows: &[CfRankListRow]) -> Vec<ContestRank> {
    rows.iter()
        .flat_map(|row| {
            row.party.members.iter().map(move |member| ContestRank {
                handle: member.handle.clone(),
                position: row.rank,
            })
        })
        .collect()
}

pub fn contest_details(standings: &CfContestStandings) -> ContestDetails {
    let info = contest_info(&standings.contest);
    let problems = standings
        .problems
        .iter()
        .map(|p| problem(p, &info))
        .collect();

    ContestDetails {
        rank: contest_ranks(&standings.rows),
        problems,
        info,
    }
}
