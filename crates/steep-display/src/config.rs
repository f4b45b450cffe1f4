//! Display configuration.
//!
//! Defaults point at a local API; override via environment variables or CLI
//! flags for a mounted kitchen screen.

use std::time::Duration;

/// Configuration for the kitchen display.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Base URL of the steep-api server.
    pub base_url: String,
    /// Poll interval for the board refresh.
    pub refresh: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            refresh: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DisplayConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `KITCHEN_API_URL` (default: `http://127.0.0.1:3000`)
    /// - `KITCHEN_REFRESH_SECS` (default: 30)
    /// - `KITCHEN_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("KITCHEN_API_URL").unwrap_or(defaults.base_url),
            refresh: env_secs("KITCHEN_REFRESH_SECS").unwrap_or(defaults.refresh),
            timeout: env_secs("KITCHEN_TIMEOUT_SECS").unwrap_or(defaults.timeout),
        }
    }
}

fn env_secs(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}
