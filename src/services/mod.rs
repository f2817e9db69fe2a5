//! Business logic services
//!
//! Each service serves entities from the [`CacheStore`](crate::db::CacheStore)
//! while they are fresh and falls back to the Codeforces API otherwise.

pub mod arena;
pub mod contest_service;
pub mod problem_service;
pub mod statistics;
pub mod user_service;

pub use arena::ContestArena;
pub use contest_service::ContestService;
pub use problem_service::ProblemService;
pub use user_service::UserService;
