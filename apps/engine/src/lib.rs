#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod sourcing;

// Re-exports for public API
pub use config::EngineSettings;
pub use error::AppError;
pub use errors::{DomainError, SourcingError, ValidationKind};
pub use services::{Preferences, SessionDriver, SessionHandle, SessionUpdate};
pub use sourcing::{PairOrigin, PairPipeline, SessionRequest, SourcedPairs};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
