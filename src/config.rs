//! Dashboard configuration.
//!
//! Values come from defaults, then environment variables, then CLI flags.
//!
//! # Example
//!
//! ```
//! use wendash::config::DashboardConfig;
//! use std::time::Duration;
//!
//! let config = DashboardConfig::default()
//!     .with_base_url("http://bot.internal:10000/")
//!     .with_poll_interval(Duration::from_secs(10));
//! assert_eq!(config.endpoint("/status"), "http://bot.internal:10000/status");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DashError, DashResult};
use crate::feed::FEED_CAPACITY;

/// Default backend address (the dashboard server's default port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";

/// Status poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Stream reconnection delay until the server sends `retry:`.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// A connected stream with no traffic for this long is shown as stale.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(45);

pub const ENV_URL: &str = "WENDASH_URL";
pub const ENV_TOKEN: &str = "WENDASH_TOKEN";
pub const ENV_POLL_MS: &str = "WENDASH_POLL_MS";
pub const ENV_LOG_DIR: &str = "WENDASH_LOG_DIR";

/// Runtime configuration for the dashboard client.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Backend base URL without trailing slash
    pub base_url: String,
    /// Bearer token for `/action`; empty means no credential
    pub auth_token: String,
    /// Period of the status poll
    pub poll_interval: Duration,
    /// Maximum feed length
    pub feed_capacity: usize,
    /// Initial stream reconnection delay
    pub reconnect_delay: Duration,
    /// Idle time after which the stream is flagged stale
    pub stale_after: Duration,
    /// Directory for the log file (None = `~/.wendash/logs`)
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: String::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            feed_capacity: FEED_CAPACITY,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            stale_after: DEFAULT_STALE_AFTER,
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. Trailing slashes are removed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_feed_capacity(mut self, capacity: usize) -> Self {
        self.feed_capacity = capacity;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_stale_after(mut self, after: Duration) -> Self {
        self.stale_after = after;
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Build a config from `WENDASH_*` environment variables.
    pub fn from_env() -> DashResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> DashResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            config = config.with_auth_token(token.trim());
        }
        if let Some(ms) = lookup(ENV_POLL_MS).filter(|v| !v.trim().is_empty()) {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                DashError::Config(format!("{} must be a number of milliseconds, got '{}'", ENV_POLL_MS, ms))
            })?;
            if ms == 0 {
                return Err(DashError::Config(format!("{} must be greater than zero", ENV_POLL_MS)));
            }
            config = config.with_poll_interval(Duration::from_millis(ms));
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|v| !v.trim().is_empty()) {
            config = config.with_log_dir(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject URLs the HTTP client could never reach.
    pub fn validate(&self) -> DashResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DashError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Full URL for an endpoint path such as `/status`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Value of the `Authorization` header: `Bearer <token>`, or empty.
    pub fn authorization_header(&self) -> String {
        if self.auth_token.is_empty() {
            String::new()
        } else {
            format!("Bearer {}", self.auth_token)
        }
    }

    /// Resolved log directory.
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".wendash").join("logs")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.base_url, "http://localhost:10000");
        assert_eq!(config.auth_token, "");
        assert_eq!(config.poll_interval, Duration::from_millis(5000));
        assert_eq!(config.feed_capacity, 200);
        assert_eq!(config.reconnect_delay, Duration::from_millis(3000));
        assert_eq!(config.stale_after, Duration::from_secs(45));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = DashboardConfig::default().with_base_url("http://h:1//");
        assert_eq!(config.endpoint("/stream"), "http://h:1/stream");
        assert_eq!(config.endpoint("action"), "http://h:1/action");
    }

    #[test]
    fn test_authorization_header() {
        let config = DashboardConfig::default();
        assert_eq!(config.authorization_header(), "");

        let config = config.with_auth_token("s3cret");
        assert_eq!(config.authorization_header(), "Bearer s3cret");
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_URL, "https://bot.example.com/"),
            (ENV_TOKEN, " abc "),
            (ENV_POLL_MS, "2500"),
            (ENV_LOG_DIR, "/tmp/wendash-logs"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://bot.example.com");
        assert_eq!(config.auth_token, "abc");
        assert_eq!(config.poll_interval, Duration::from_millis(2500));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/wendash-logs")));
    }

    #[test]
    fn test_from_lookup_empty_env_keeps_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[(ENV_URL, "  ")])).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_poll_interval() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_POLL_MS, "soon")])).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));

        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_POLL_MS, "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_URL, "ftp://bot")])).unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var(ENV_URL, "http://env-host:9000/");
        std::env::set_var(ENV_TOKEN, "from-env");
        let result = DashboardConfig::from_env();
        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_TOKEN);

        let config = result.unwrap();
        assert_eq!(config.base_url, "http://env-host:9000");
        assert_eq!(config.authorization_header(), "Bearer from-env");
    }

    #[test]
    fn test_log_directory_override() {
        let config = DashboardConfig::default().with_log_dir("/var/log/wendash");
        assert_eq!(config.log_directory(), Some(PathBuf::from("/var/log/wendash")));
    }
}
