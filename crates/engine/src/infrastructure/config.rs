//! Runtime configuration loaded from the environment.

use std::time::Duration;

/// Default primary game-stats API base URL.
pub const DEFAULT_HYPIXEL_BASE_URL: &str = "https://api.hypixel.net";

/// Default community aggregator base URL.
pub const DEFAULT_SKYCRYPT_BASE_URL: &str = "https://sky.shiiyu.moe";

/// Default per-request timeout, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Upstream endpoints, credentials and timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    pub hypixel_base_url: String,
    pub hypixel_api_key: Option<String>,
    pub skycrypt_base_url: String,
    pub timeout: Duration,
}

impl StatsConfig {
    /// Create config from environment variables.
    ///
    /// Reads `HYPIXEL_API_KEY`, `HYPIXEL_BASE_URL`, `SKYCRYPT_BASE_URL` and
    /// `UPSTREAM_TIMEOUT_SECS`, falling back to defaults if not set. A blank
    /// API key counts as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            hypixel_base_url: lookup("HYPIXEL_BASE_URL").unwrap_or(defaults.hypixel_base_url),
            hypixel_api_key: lookup("HYPIXEL_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            skycrypt_base_url: lookup("SKYCRYPT_BASE_URL").unwrap_or(defaults.skycrypt_base_url),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.hypixel_api_key.is_some()
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            hypixel_base_url: DEFAULT_HYPIXEL_BASE_URL.to_string(),
            hypixel_api_key: None,
            skycrypt_base_url: DEFAULT_SKYCRYPT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}
