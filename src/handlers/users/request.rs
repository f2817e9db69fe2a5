//! User request DTOs

use serde::Deserialize;

/// Rated user list query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedUsersQuery {
    /// Only users who took part in a rated contest recently
    #[serde(default = "default_active_only")]
    pub active_only: bool,

    #[serde(default)]
    pub include_retired: bool,
}

impl Default for RatedUsersQuery {
    fn default() -> Self {
        Self {
            active_only: default_active_only(),
            include_retired: false,
        }
    }
}

fn default_active_only() -> bool {
    true
}
