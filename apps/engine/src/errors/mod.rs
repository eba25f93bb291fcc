//! Error handling for the Emoji Link engine.

pub mod domain;
pub mod sourcing;

pub use domain::{DomainError, ValidationKind};
pub use sourcing::SourcingError;
