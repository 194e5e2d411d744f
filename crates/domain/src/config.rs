//! Client configuration
//!
//! Every field has a default, so a partial file or an empty environment still
//! yields a usable (unauthenticated) configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_RATE_LIMIT_WAIT_MS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};

/// Construction-time settings for a PluralKit client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API token; sent verbatim in the `Authorization` header
    pub token: Option<String>,
    /// Base URL of the v2 API (override for testing)
    pub base_url: String,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Wait used when a 429 response carries no hint
    pub default_rate_limit_wait_ms: u64,
    /// Longest hint the client will sleep through before giving up; no cap
    /// when unset
    pub max_rate_limit_wait_ms: Option<u64>,
    /// Optional client-side pacing of outgoing requests
    pub requests_per_second: Option<u32>,
}

impl ClientConfig {
    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Wait used when a 429 response carries no hint
    pub fn default_rate_limit_wait(&self) -> Duration {
        Duration::from_millis(self.default_rate_limit_wait_ms)
    }

    /// Longest rate-limit hint honoured by the automatic retry, if capped
    pub fn max_rate_limit_wait(&self) -> Option<Duration> {
        self.max_rate_limit_wait_ms.map(Duration::from_millis)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_rate_limit_wait_ms: DEFAULT_RATE_LIMIT_WAIT_MS,
            max_rate_limit_wait_ms: None,
            requests_per_second: None,
        }
    }
}

// Hand-written so the token never reaches logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("default_rate_limit_wait_ms", &self.default_rate_limit_wait_ms)
            .field("max_rate_limit_wait_ms", &self.max_rate_limit_wait_ms)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}
