use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Persistence error: {detail}")]
    Persistence { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable SCREAMING_SNAKE_CASE code for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::Validation(..)) => "VALIDATION_ERROR",
            AppError::Domain(DomainError::LoadFailure(_)) => "LOAD_FAILURE",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Persistence { .. } => "PERSISTENCE_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn persistence(detail: String) -> Self {
        Self::Persistence { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::persistence(format!("io error: {e}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::persistence(format!("json error: {e}"))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::internal(format!("task join error: {e}"))
    }
}
