//! Database module
//!
//! Connection setup, migrations, repositories and the [`CacheStore`] built
//! on top of them.

pub mod connection;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::connect;
pub use store::{CacheStore, Cached, PgStore};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
