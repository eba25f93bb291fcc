//! Failure taxonomy for remote pair generation.
//!
//! Every variant is caught inside the sourcing pipeline and converted into the
//! offline fallback substitution; none of them reach the match engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourcingError {
    /// Missing credential or endpoint for a provider that needs one.
    #[error("Configuration error: {detail}")]
    Configuration { detail: String },
    /// Network failure or non-success response.
    #[error("Transport error: {detail}")]
    Transport {
        detail: String,
        status: Option<u16>,
    },
    /// Response JSON missing or malformed `pairs`, or entries without `word`/`emoji`.
    #[error("Schema error: {detail}")]
    Schema { detail: String },
    /// The provider answered with zero pairs.
    #[error("Provider returned no pairs")]
    EmptyResult,
}

impl SourcingError {
    /// Short stable label used in logs and fallback notices.
    pub fn kind(&self) -> &'static str {
        match self {
            SourcingError::Configuration { .. } => "configuration",
            SourcingError::Transport { .. } => "transport",
            SourcingError::Schema { .. } => "schema",
            SourcingError::EmptyResult => "empty_result",
        }
    }

    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
            status: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Transport {
            detail: format!("Status {status}"),
            status: Some(status),
        }
    }

    pub fn schema(detail: impl Into<String>) -> Self {
        Self::Schema {
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for SourcingError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => SourcingError::status(status.as_u16()),
            None => SourcingError::transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for SourcingError {
    fn from(e: serde_json::Error) -> Self {
        SourcingError::schema(e.to_string())
    }
}
