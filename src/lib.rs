//! cfstats - Codeforces statistics service
//!
//! Serves users, problems and contests of Codeforces from a PostgreSQL
//! cache, refetching from the Codeforces API once a cached record is older
//! than two hours, together with statistics derived from them: rank tiers
//! and level, difficulty and tag histograms.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: cache-or-fetch orchestration and statistics
//! - **Codeforces**: upstream API client
//! - **Db**: repositories and the cache store
//! - **Models**: domain models

pub mod codeforces;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::{middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    handlers::routes()
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
