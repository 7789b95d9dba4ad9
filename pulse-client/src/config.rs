//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pulse_types::ConfigError;
use serde::{Deserialize, Serialize};

/// Default backend base URL. Paths such as `/v1/members/` are appended to it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default timeout for non-streaming requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default location of the preferences file.
pub const DEFAULT_PREFERENCES_PATH: &str = "pulse-preferences.json";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "PULSE_API_BASE_URL";
/// Environment variable overriding [`ClientConfig::timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PULSE_API_TIMEOUT_SECS";
/// Environment variable overriding [`ClientConfig::preferences_path`].
pub const ENV_PREFERENCES_PATH: &str = "PULSE_PREFERENCES_PATH";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    /// Total timeout for non-streaming requests. Streamed generations only
    /// get a connect timeout.
    #[serde(rename = "timeout_secs", with = "secs")]
    pub timeout: Duration,
    /// Preferences file used by the CLI.
    pub preferences_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `PULSE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Load a JSON config file. Missing fields keep their defaults.
    ///
    /// ```json
    /// { "base_url": "https://pulse.example.com/api", "timeout_secs": 10 }
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides looked up by `var`. Split out of
    /// [`from_env`](Self::from_env) so tests need not touch the process
    /// environment.
    pub fn overlay(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = var(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = var(ENV_PREFERENCES_PATH).filter(|v| !v.is_empty()) {
            self.preferences_path = PathBuf::from(path);
        }
        Ok(self)
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
