//! Utility functions

pub mod time;
pub mod validation;

pub use time::{age_of, format_duration, is_fresh, is_fresh_at, now_utc};
pub use validation::{split_list, validate_handle, validate_level};
