//! Repository traits for persisted player data.

pub mod preferences;
