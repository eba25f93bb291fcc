//! Turn state machine.
//!
//! `apply` is the only mutator of a [`SessionState`]. It consumes one event at
//! a time and returns the effects the caller must carry out (timers to start or
//! cancel, an outcome to report). No clocks or tasks live here.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::domain::cards_types::Card;
use crate::domain::rules::{
    MAX_SELECTION, MISMATCH_RESET_DELAY, TICK_INTERVAL, WIN_REPORT_DELAY,
};
use crate::domain::state::{Phase, SessionId, SessionState};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// One-shot: flip a mismatched selection back down.
    MismatchReset,
    /// One-shot: hand the win to the caller after the display delay.
    WinReport,
    /// Repeating: advance the elapsed-seconds counter.
    Tick,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [TimerKind::MismatchReset, TimerKind::WinReport, TimerKind::Tick];

    pub fn delay(self) -> Duration {
        match self {
            TimerKind::MismatchReset => MISMATCH_RESET_DELAY,
            TimerKind::WinReport => WIN_REPORT_DELAY,
            TimerKind::Tick => TICK_INTERVAL,
        }
    }

    pub fn is_repeating(self) -> bool {
        matches!(self, TimerKind::Tick)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A deck was built for `session_id`.
    DeckLoaded { session_id: SessionId, deck: Vec<Card> },
    /// The player picked a card.
    Flip { card_id: String },
    /// A timer started under `session_id` elapsed.
    TimerFired { session_id: SessionId, timer: TimerKind },
    /// The player abandoned the session.
    Exit,
    /// Tear down the current session and wait for a new deck.
    Reset,
}

/// Terminal result handed to the caller exactly once per played session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub won: bool,
    pub move_count: u32,
    pub elapsed_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartTimer {
        session_id: SessionId,
        timer: TimerKind,
        after: Duration,
    },
    CancelTimer {
        session_id: SessionId,
        timer: TimerKind,
    },
    ReportOutcome(SessionOutcome),
}

fn start(state: &SessionState, timer: TimerKind) -> Effect {
    Effect::StartTimer {
        session_id: state.session_id,
        timer,
        after: timer.delay(),
    }
}

fn cancel(state: &SessionState, timer: TimerKind) -> Effect {
    Effect::CancelTimer {
        session_id: state.session_id,
        timer,
    }
}

fn outcome(state: &SessionState, won: bool) -> SessionOutcome {
    SessionOutcome {
        won,
        move_count: state.move_count,
        elapsed_seconds: state.elapsed_seconds,
    }
}

/// Apply one event to the session.
///
/// Intents that are not legal in the current phase are ignored and produce no
/// effects. Errors are reserved for malformed input: an empty deck and a card
/// id that is not on the board.
pub fn apply(state: &mut SessionState, event: Event) -> Result<Vec<Effect>, DomainError> {
    match event {
        Event::DeckLoaded { session_id, deck } => load_deck(state, session_id, deck),
        Event::Flip { card_id } => flip(state, &card_id),
        Event::TimerFired { session_id, timer } => {
            if session_id != state.session_id {
                debug!(
                    session_id,
                    current = state.session_id,
                    ?timer,
                    "discarding stale timer"
                );
                return Ok(Vec::new());
            }
            Ok(timer_fired(state, timer))
        }
        Event::Exit => Ok(exit(state)),
        Event::Reset => Ok(reset(state)),
    }
}

fn load_deck(
    state: &mut SessionState,
    session_id: SessionId,
    deck: Vec<Card>,
) -> Result<Vec<Effect>, DomainError> {
    if session_id != state.session_id {
        debug!(
            session_id,
            current = state.session_id,
            "discarding stale deck"
        );
        return Ok(Vec::new());
    }
    if state.phase != Phase::Loading {
        debug!(session_id, phase = ?state.phase, "deck arrived outside loading");
        return Ok(Vec::new());
    }
    if deck.is_empty() {
        return Err(DomainError::load_failure("deck has no cards"));
    }

    state.deck = deck;
    state.selected.clear();
    state.matched_pair_keys.clear();
    state.move_count = 0;
    state.elapsed_seconds = 0;
    state.outcome_reported = false;
    state.phase = Phase::Active;

    Ok(vec![start(state, TimerKind::Tick)])
}

fn flip(state: &mut SessionState, card_id: &str) -> Result<Vec<Effect>, DomainError> {
    if state.phase != Phase::Active || state.selected.len() >= MAX_SELECTION {
        return Ok(Vec::new());
    }

    let card = state.card_mut(card_id).ok_or_else(|| {
        DomainError::validation(ValidationKind::UnknownCard, format!("no card {card_id}"))
    })?;
    if !card.is_selectable() {
        return Ok(Vec::new());
    }
    card.is_flipped = true;
    state.selected.push(card_id.to_string());

    if state.selected.len() < MAX_SELECTION {
        return Ok(Vec::new());
    }
    Ok(resolve(state))
}

/// Two cards are face up: count the move and compare them.
fn resolve(state: &mut SessionState) -> Vec<Effect> {
    state.phase = Phase::Resolving;
    state.move_count += 1;

    let keys: Vec<String> = state
        .selected
        .iter()
        .filter_map(|id| state.card(id).map(|c| c.pair_key.clone()))
        .collect();
    let is_match = keys.len() == MAX_SELECTION && keys[0] == keys[1];

    if !is_match {
        return vec![start(state, TimerKind::MismatchReset)];
    }

    let selected = std::mem::take(&mut state.selected);
    for id in &selected {
        if let Some(card) = state.card_mut(id) {
            card.is_matched = true;
        }
    }
    state.matched_pair_keys.insert(keys[0].clone());

    if state.all_matched() {
        state.phase = Phase::Won;
        return vec![
            cancel(state, TimerKind::Tick),
            start(state, TimerKind::WinReport),
        ];
    }
    state.phase = Phase::Active;
    Vec::new()
}

fn timer_fired(state: &mut SessionState, timer: TimerKind) -> Vec<Effect> {
    match timer {
        TimerKind::Tick => {
            if state.phase.is_live() {
                state.elapsed_seconds += 1;
            }
            Vec::new()
        }
        TimerKind::MismatchReset => {
            if state.phase != Phase::Resolving {
                return Vec::new();
            }
            let selected = std::mem::take(&mut state.selected);
            for id in &selected {
                if let Some(card) = state.card_mut(id) {
                    card.is_flipped = false;
                }
            }
            state.phase = Phase::Active;
            Vec::new()
        }
        TimerKind::WinReport => {
            if state.phase != Phase::Won || state.outcome_reported {
                return Vec::new();
            }
            state.outcome_reported = true;
            vec![Effect::ReportOutcome(outcome(state, true))]
        }
    }
}

fn exit(state: &mut SessionState) -> Vec<Effect> {
    match state.phase {
        Phase::Loading => {
            state.phase = Phase::Exited;
            Vec::new()
        }
        Phase::Active | Phase::Resolving => {
            state.phase = Phase::Exited;
            state.outcome_reported = true;
            vec![
                cancel(state, TimerKind::Tick),
                cancel(state, TimerKind::MismatchReset),
                Effect::ReportOutcome(outcome(state, false)),
            ]
        }
        Phase::Won | Phase::Exited => Vec::new(),
    }
}

fn reset(state: &mut SessionState) -> Vec<Effect> {
    let cancels = TimerKind::ALL
        .iter()
        .map(|&timer| cancel(state, timer))
        .collect();
    *state = SessionState::new(state.session_id.wrapping_add(1));
    cancels
}
