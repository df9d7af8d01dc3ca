//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::upstream::DEFAULT_BASE_URL;

/// Front-end origins allowed when `ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://yourdomain.com",
    "http://localhost:3000",
    "http://localhost:8000",
];

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// ATS API key; requests that need it fail with a configuration error when absent
    pub ats_api_key: Option<String>,
    /// ATS API base URL
    pub ats_base_url: String,
    /// User-Agent sent upstream
    pub user_agent: String,
    /// Origins granted CORS access
    pub allowed_origins: Vec<String>,
    /// Development mode reflects any origin
    pub development: bool,
    /// Lookup cache TTL in seconds
    pub cache_ttl: u64,
    /// Lookup cache capacity
    pub cache_max_entries: usize,
    /// Expired-entry sweep interval in seconds, 0 disables the sweep
    pub cache_sweep_interval: u64,
    /// Deadline for job lookups in milliseconds
    pub lookup_timeout_ms: u64,
    /// Deadline for application submissions in milliseconds
    pub submit_timeout_ms: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ASHBY_API_KEY` - ATS API key (no default)
    /// - `ASHBY_API_BASE_URL` - ATS base URL (default: https://api.ashbyhq.com)
    /// - `ATS_USER_AGENT` - upstream User-Agent (default: JobSite-Proxy/1.0)
    /// - `ALLOWED_ORIGINS` - comma-separated CORS origins
    /// - `APP_ENV` - `development` reflects any origin (default: production)
    /// - `CACHE_TTL` - lookup cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - lookup cache capacity (default: 100)
    /// - `CACHE_SWEEP_INTERVAL` - expired entry sweep in seconds, 0 = off (default: 60)
    /// - `LOOKUP_TIMEOUT_MS` - job lookup deadline (default: 10000)
    /// - `SUBMIT_TIMEOUT_MS` - submission deadline (default: 30000)
    /// - `MAX_BODY_BYTES` - request body limit (default: 16 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            ats_api_key: env::var("ASHBY_API_KEY").ok().filter(|k| !k.is_empty()),
            ats_base_url: env::var("ASHBY_API_BASE_URL").unwrap_or(defaults.ats_base_url),
            user_agent: env::var("ATS_USER_AGENT").unwrap_or(defaults.user_agent),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.allowed_origins),
            development: env::var("APP_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("development")),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.cache_sweep_interval),
            lookup_timeout_ms: env_or("LOOKUP_TIMEOUT_MS", defaults.lookup_timeout_ms),
            submit_timeout_ms: env_or("SUBMIT_TIMEOUT_MS", defaults.submit_timeout_ms),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            ats_api_key: None,
            ats_base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "JobSite-Proxy/1.0".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            development: false,
            cache_ttl: DEFAULT_TTL_SECS,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_sweep_interval: 60,
            lookup_timeout_ms: 10_000,
            submit_timeout_ms: 30_000,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

// The API key never reaches the logs through `{:?}`.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("ats_api_key", &self.ats_api_key.as_ref().map(|_| "<redacted>"))
            .field("ats_base_url", &self.ats_base_url)
            .field("user_agent", &self.user_agent)
            .field("allowed_origins", &self.allowed_origins)
            .field("development", &self.development)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_max_entries", &self.cache_max_entries)
            .field("cache_sweep_interval", &self.cache_sweep_interval)
            .field("lookup_timeout_ms", &self.lookup_timeout_ms)
            .field("submit_timeout_ms", &self.submit_timeout_ms)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(config.submit_timeout(), Duration::from_secs(30));
        assert_eq!(config.allowed_origins.len(), 3);
        assert!(config.ats_api_key.is_none());
        assert!(!config.development);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("LOOKUP_TIMEOUT_MS");
        env::remove_var("SUBMIT_TIMEOUT_MS");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.lookup_timeout_ms, 10_000);
        assert_eq!(config.submit_timeout_ms, 30_000);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.example , ,http://localhost:3000,"),
            vec!["https://a.example", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            ats_api_key: Some("sk_live_secret".to_string()),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("sk_live_secret"));
    }
}
