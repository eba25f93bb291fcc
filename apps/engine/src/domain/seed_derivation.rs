//! Seed derivation for reproducible runs.
//!
//! A driver or simulator holds one base seed and derives a fresh, stable deck
//! seed for each session it starts.

/// Derive the deck-shuffle seed for the `session_no`-th session under `base_seed`.
pub fn derive_deck_seed(base_seed: u64, session_no: u64) -> u64 {
    base_seed
        .wrapping_add(session_no.wrapping_mul(1_000_003))
        .wrapping_add(2)
}

/// Derive a seed for bot decisions in the same session, kept apart from the
/// deck seed so changing one does not perturb the other.
pub fn derive_bot_seed(base_seed: u64, session_no: u64) -> u64 {
    base_seed
        .wrapping_add(session_no.wrapping_mul(10_007))
        .wrapping_add(1)
}
