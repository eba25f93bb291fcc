//! Process-level settings read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::sourcing::request::RequestDefaults;

pub const DATA_DIR_VAR: &str = "EMOJI_LINK_DATA_DIR";
pub const HTTP_TIMEOUT_VAR: &str = "EMOJI_LINK_HTTP_TIMEOUT_SECS";
pub const API_KEY_VAR: &str = "EMOJI_LINK_API_KEY";
pub const BASE_URL_VAR: &str = "EMOJI_LINK_BASE_URL";

const DEFAULT_DATA_DIR: &str = ".emoji-link";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Directory holding the JSON preference files.
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
    /// Credential used when a provider config has none.
    pub api_key: Option<String>,
    /// Endpoint used when neither the provider config nor its kind has one.
    pub base_url: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            api_key: None,
            base_url: None,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            data_dir: optional_var(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            http_timeout: http_timeout()?,
            api_key: optional_var(API_KEY_VAR),
            base_url: optional_var(BASE_URL_VAR),
        })
    }

    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Trimmed value of `key`, or `None` when unset or blank.
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn http_timeout() -> Result<Duration, AppError> {
    let Some(raw) = optional_var(HTTP_TIMEOUT_VAR) else {
        return Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::config(format!(
            "{HTTP_TIMEOUT_VAR} must be a positive integer, got '{raw}'"
        ))),
    }
}
