//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod contest;
pub mod problem;
pub mod statistics;
pub mod user;

pub use contest::*;
pub use problem::*;
pub use statistics::*;
pub use user::*;
