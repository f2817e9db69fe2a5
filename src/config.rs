//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CODEFORCES_API_URL, DEFAULT_CODEFORCES_CALL_DELAY_MS,
    DEFAULT_CODEFORCES_STANDINGS_COUNT, DEFAULT_CODEFORCES_TIMEOUT_SECS,
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub codeforces: CodeforcesConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Upstream Codeforces API configuration
#[derive(Debug, Clone)]
pub struct CodeforcesConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    /// Minimum spacing between two successive upstream calls
    pub call_delay: Duration,
    pub timeout: Duration,
    /// Number of standings rows requested per contest
    pub standings_count: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            codeforces: CodeforcesConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default())
                .ok_or_else(|| ConfigError::InvalidValue("LOG_FORMAT".to_string()))?,
        })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "" | "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl CodeforcesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let call_delay_ms: u64 = env::var("CODEFORCES_CALL_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_CODEFORCES_CALL_DELAY_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CODEFORCES_CALL_DELAY_MS".to_string()))?;
        let timeout_secs: u64 = env::var("CODEFORCES_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_CODEFORCES_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CODEFORCES_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            api_url: env::var("CODEFORCES_API_URL")
                .unwrap_or_else(|_| DEFAULT_CODEFORCES_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            call_delay: Duration::from_millis(call_delay_ms),
            timeout: Duration::from_secs(timeout_secs),
            standings_count: env::var("CODEFORCES_STANDINGS_COUNT")
                .unwrap_or_else(|_| DEFAULT_CODEFORCES_STANDINGS_COUNT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CODEFORCES_STANDINGS_COUNT".to_string()))?,
        })
    }
}

impl Default for CodeforcesConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CODEFORCES_API_URL.to_string(),
            call_delay: Duration::from_millis(DEFAULT_CODEFORCES_CALL_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_CODEFORCES_TIMEOUT_SECS),
            standings_count: DEFAULT_CODEFORCES_STANDINGS_COUNT,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
