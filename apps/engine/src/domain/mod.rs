//! Domain layer: pure game logic types and helpers.

pub mod cards_types;
pub mod dealing;
pub mod levels;
pub mod match_engine;
pub mod progression;
pub mod rules;
pub mod seed_derivation;
pub mod settings;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_match_engine;
#[cfg(test)]
mod tests_props_engine;

// Re-exports for ergonomics
pub use cards_types::{Card, CardKind, Pair};
pub use dealing::{build_deck, build_deck_seeded, deck_rng};
pub use levels::{last_level, level_at, LevelData};
pub use match_engine::{apply, Effect, Event, SessionOutcome, TimerKind};
pub use progression::{record_outcome, GameStats};
pub use seed_derivation::{derive_bot_seed, derive_deck_seed};
pub use settings::{GameConfig, GameMode, Language};
pub use snapshot::SessionSnapshot;
pub use state::{Phase, SessionId, SessionState};
