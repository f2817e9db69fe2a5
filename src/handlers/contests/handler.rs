//! Contest handler implementations

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{ContestDetails, ContestInfo},
    services::ContestService,
    state::AppState,
};

/// Get a contest with its standings and problems
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ContestDetails>> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Malformed contest id: {}", id)))?;

    let details =
        ContestService::get_contest(state.api(), state.store(), state.standings_count(), id).await?;

    Ok(Json(details))
}

/// List all contests
pub async fn list_contests(State(state): State<AppState>) -> AppResult<Json<Vec<ContestInfo>>> {
    let contests = ContestService::list_contests(state.api(), state.store()).await?;
    Ok(Json(contests))
}

/// List contests that have not finished
pub async fn upcoming_contests(State(state): State<AppState>) -> AppResult<Json<Vec<ContestInfo>>> {
    let contests = ContestService::upcoming_contests(state.api(), state.store()).await?;
    Ok(Json(contests))
}
