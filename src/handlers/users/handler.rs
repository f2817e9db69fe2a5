//! User handler implementations

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{RatedUser, UserProfile},
    services::UserService,
    state::AppState,
    utils::validate_handle,
};

use super::request::RatedUsersQuery;

/// Get a user with its derived rank tiers and statistics
pub async fn get_user(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<Json<UserProfile>> {
    validate_handle(&handle).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let profile = UserService::get_profile(state.api(), state.store(), &handle).await?;

    Ok(Json(profile))
}

/// List rated users
pub async fn list_rated(
    State(state): State<AppState>,
    query: Result<Query<RatedUsersQuery>, QueryRejection>,
) -> AppResult<Json<Vec<RatedUser>>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let users =
        UserService::list_rated(state.api(), query.active_only, query.include_retired).await?;

    Ok(Json(users))
}
