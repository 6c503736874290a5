// ABOUTME: Engine connection and polling settings.
// ABOUTME: Read from the descriptor's optional `engine` section with human-readable durations.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "v1.41";

/// How to reach the engine and how to wait on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Explicit control socket path (overrides detection).
    #[serde(default)]
    pub socket: Option<PathBuf>,

    /// API version used as the path prefix, e.g. `v1.41`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Delay between readiness polls.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Upper bound on the readiness wait. Unset means wait forever.
    #[serde(default, with = "humantime_serde")]
    pub ready_timeout: Option<Duration>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            socket: None,
            api_version: default_api_version(),
            poll_interval: default_poll_interval(),
            ready_timeout: None,
        }
    }
}

impl EngineSettings {
    /// Path prefix for every engine call, e.g. `/v1.41`.
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.api_version.trim_matches('/'))
    }
}
