//! Configuration loading for the Reckon console.
//!
//! Configuration is a TOML file located via `--config` or
//! `RECKON_TUI_CONFIG`; every field has a default so the console also runs
//! with no file at all, pointed at a local backend. `RECKON_API_BASE_URL`
//! overrides the backend origin regardless of where the rest of the
//! configuration came from.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "RECKON_TUI_CONFIG";
pub const ENV_API_BASE_URL: &str = "RECKON_API_BASE_URL";

/// Default local backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TuiConfig {
    /// Backend origin; requests go out under `/api`.
    pub api_base_url: String,
    /// Origin of the authentication endpoints (no `/api` prefix).
    pub auth_base_url: String,
    pub request_timeout_ms: u64,
    pub auth_request_timeout_ms: u64,
    /// Period of the background ticket re-fetch.
    pub poll_interval_ms: u64,
    pub session_path: PathBuf,
    pub state_path: PathBuf,
    pub error_log_path: PathBuf,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 15_000,
            auth_request_timeout_ms: 5_000,
            poll_interval_ms: 10_000,
            session_path: PathBuf::from(".reckon/session.json"),
            state_path: PathBuf::from(".reckon/state.json"),
            error_log_path: PathBuf::from(".reckon/reckon-tui.log"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path_from_args().or_else(config_path_from_env) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(origin) = env_non_empty(ENV_API_BASE_URL) {
            self.api_base_url = origin;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("auth_base_url", &self.auth_base_url),
        ] {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must use http:// or https://".to_string(),
                });
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.auth_request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth_request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.session_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.state_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "state_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.error_log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "error_log_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}
