//! Contest handlers

mod handler;

pub use handler::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Contest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/many", get(handler::list_contests))
        .route("/upcoming", get(handler::upcoming_contests))
        .route("/{id}", get(handler::get_contest))
}
