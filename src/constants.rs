//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 4000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// UPSTREAM (CODEFORCES) DEFAULTS
// =============================================================================

/// Default base URL of the Codeforces API
pub const DEFAULT_CODEFORCES_API_URL: &str = "https://codeforces.com/api";

/// Default spacing between successive upstream calls in milliseconds
pub const DEFAULT_CODEFORCES_CALL_DELAY_MS: u64 = 500;

/// Default upstream request timeout in seconds
pub const DEFAULT_CODEFORCES_TIMEOUT_SECS: u64 = 30;

/// Default number of standings rows requested per contest
pub const DEFAULT_CODEFORCES_STANDINGS_COUNT: u32 = 100;

/// Upstream API method names
pub mod api_methods {
    pub const USER_INFO: &str = "user.info";
    pub const USER_STATUS: &str = "user.status";
    pub const USER_RATED_LIST: &str = "user.ratedList";
    pub const PROBLEMSET_PROBLEMS: &str = "problemset.problems";
    pub const CONTEST_LIST: &str = "contest.list";
    pub const CONTEST_STANDINGS: &str = "contest.standings";
}

/// Envelope status reported by a successful upstream call
pub const UPSTREAM_STATUS_OK: &str = "OK";

/// Submission verdict counted as a solve
pub const VERDICT_OK: &str = "OK";

// =============================================================================
// CACHE
// =============================================================================

/// Age in seconds after which a cached record must be refetched
pub const STALENESS_THRESHOLD_SECONDS: i64 = 7200;

/// `sync_state` resource written after a full problemset refresh
pub const SYNC_PROBLEMSET: &str = "problemset";

/// `sync_state` resource written after a full contest list refresh
pub const SYNC_CONTEST_LIST: &str = "contest_list";

// =============================================================================
// STATISTICS
// =============================================================================

/// Level assigned to problems whose index does not start with a letter
pub const FALLBACK_LEVEL: &str = "0";

/// Histogram key for problems without a difficulty rating
pub const UNKNOWN_DIFFICULTY: &str = "Unknown";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum handle length accepted on the user endpoints
pub const MAX_HANDLE_LENGTH: usize = 64;
