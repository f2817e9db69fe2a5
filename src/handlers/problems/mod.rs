//! Problem handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/many", get(handler::get_problemset))
        .route("/{key}", get(handler::get_problem))
}
