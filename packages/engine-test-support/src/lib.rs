//! Engine test support utilities
//!
//! Shared by the engine's unit and integration tests: one-time logging
//! initialisation and a process-environment guard.

pub mod env;
pub mod logging;
