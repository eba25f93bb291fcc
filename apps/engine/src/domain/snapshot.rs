//! Read-only session view handed to the presentation side.

use serde::Serialize;

use crate::domain::cards_types::Card;
use crate::domain::state::{Phase, SessionId, SessionState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: Phase,
    pub cards: Vec<Card>,
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

impl SessionSnapshot {
    pub fn of(state: &SessionState) -> Self {
        Self {
            session_id: state.session_id,
            phase: state.phase,
            cards: state.deck.clone(),
            move_count: state.move_count,
            elapsed_seconds: state.elapsed_seconds,
            matched_pairs: state.matched_pair_keys.len(),
            total_pairs: state.pair_total(),
        }
    }

    /// Ids of cards a player could still pick.
    pub fn selectable_ids(&self) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(|c| c.is_selectable())
            .map(|c| c.id.as_str())
    }

    /// Elapsed time as `m:ss`.
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.elapsed_seconds / 60, self.elapsed_seconds % 60)
    }
}
