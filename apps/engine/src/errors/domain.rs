//! Domain-level error type used by the match engine and settings mutations.
//!
//! This error type is transport- and storage-agnostic. Application code that
//! needs a wider error converts through `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected domain input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    UnknownCard,
    InvalidPairCount,
    EmptyTopic,
    UnknownProvider,
    LastProvider,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Deck construction produced nothing playable; the session never goes live.
    LoadFailure(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::LoadFailure(d) => write!(f, "load failure: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn load_failure(detail: impl Into<String>) -> Self {
        Self::LoadFailure(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::LoadFailure(_) => None,
        }
    }
}
