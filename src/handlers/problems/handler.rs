//! Problem handler implementations

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Problem, ProblemKey, Problemset},
    services::ProblemService,
    state::AppState,
};

use super::request::ProblemsetQuery;

/// Get a problem by its `{contestId}-{index}` key
pub async fn get_problem(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Problem>> {
    let key = ProblemKey::parse(&key)?;

    let problem = ProblemService::get_problem(state.api(), state.store(), &key).await?;

    Ok(Json(problem))
}

/// Get the problems matching the query with their histograms
pub async fn get_problemset(
    State(state): State<AppState>,
    query: Result<Query<ProblemsetQuery>, QueryRejection>,
) -> AppResult<Json<Problemset>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    query.validate()?;

    let filter = query.into_filter();
    let problemset = ProblemService::get_problemset(state.api(), state.store(), &filter).await?;

    Ok(Json(problemset))
}
