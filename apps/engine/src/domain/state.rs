use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::cards_types::Card;

/// Monotonic per-driver session counter; timers and sourcing completions carry
/// the id they were started under so stale ones can be recognised.
pub type SessionId = u64;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for pairs and the deck.
    Loading,
    /// Accepting flips.
    Active,
    /// Two mismatched cards are showing; waiting for the reset delay.
    Resolving,
    /// Every pair matched.
    Won,
    /// Abandoned by the player.
    Exited,
}

impl Phase {
    /// Live phases advance the elapsed-time counter.
    pub fn is_live(self) -> bool {
        matches!(self, Phase::Active | Phase::Resolving)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Exited)
    }
}

/// The single live session owned by the match engine.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: SessionId,
    pub deck: Vec<Card>,
    /// Ids of face-up, unresolved cards (at most two).
    pub selected: Vec<String>,
    pub matched_pair_keys: BTreeSet<String>,
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub phase: Phase,
    /// Set once the terminal outcome has been handed to the caller.
    pub outcome_reported: bool,
}

impl SessionState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            deck: Vec::new(),
            selected: Vec::with_capacity(2),
            matched_pair_keys: BTreeSet::new(),
            move_count: 0,
            elapsed_seconds: 0,
            phase: Phase::Loading,
            outcome_reported: false,
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.deck.iter().find(|c| c.id == card_id)
    }

    pub(crate) fn card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.deck.iter_mut().find(|c| c.id == card_id)
    }

    /// Pairs on the board, from the authoritative deck length.
    pub fn pair_total(&self) -> usize {
        self.deck.len() / 2
    }

    pub fn all_matched(&self) -> bool {
        !self.deck.is_empty() && self.matched_pair_keys.len() == self.pair_total()
    }
}
