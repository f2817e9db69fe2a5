//! Database repositories
//!
//! Repositories handle all direct database interactions. Writes take a
//! connection so callers can group them in a transaction.

pub mod contest_repo;
pub mod problem_repo;
pub mod sync_repo;
pub mod user_repo;

pub use contest_repo::ContestRepository;
pub use problem_repo::ProblemRepository;
pub use sync_repo::SyncRepository;
pub use user_repo::UserRepository;
