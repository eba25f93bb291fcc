//! Scenario tests for the turn state machine.

use crate::domain::dealing::build_deck_seeded;
use crate::domain::match_engine::{apply, Effect, Event, SessionOutcome, TimerKind};
use crate::domain::rules::{MISMATCH_RESET_DELAY, WIN_REPORT_DELAY};
use crate::domain::state::{Phase, SessionState};
use crate::domain::test_gens::distinct_pairs;
use crate::errors::domain::{DomainError, ValidationKind};

fn loaded(pairs: usize) -> SessionState {
    let mut state = SessionState::new(1);
    let deck = build_deck_seeded(&distinct_pairs(pairs), 99);
    let effects = apply(
        &mut state,
        Event::DeckLoaded {
            session_id: 1,
            deck,
        },
    )
    .unwrap();
    assert_eq!(
        effects,
        vec![Effect::StartTimer {
            session_id: 1,
            timer: TimerKind::Tick,
            after: TimerKind::Tick.delay(),
        }]
    );
    state
}

fn flip(state: &mut SessionState, id: &str) -> Vec<Effect> {
    apply(
        state,
        Event::Flip {
            card_id: id.to_string(),
        },
    )
    .unwrap()
}

fn fire(state: &mut SessionState, timer: TimerKind) -> Vec<Effect> {
    let session_id = state.session_id;
    apply(state, Event::TimerFired { session_id, timer }).unwrap()
}

fn match_pair(state: &mut SessionState, i: usize) -> Vec<Effect> {
    flip(state, &format!("p{i}-word"));
    flip(state, &format!("p{i}-emoji"))
}

#[test]
fn deck_load_enters_active_with_clean_counters() {
    let state = loaded(4);
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(state.deck.len(), 8);
    assert_eq!(state.move_count, 0);
    assert!(state.selected.is_empty());
}

#[test]
fn empty_deck_is_a_load_failure_and_stays_loading() {
    let mut state = SessionState::new(1);
    let err = apply(
        &mut state,
        Event::DeckLoaded {
            session_id: 1,
            deck: Vec::new(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::LoadFailure(_)));
    assert_eq!(state.phase, Phase::Loading);
}

#[test]
fn matching_pair_resolves_immediately() {
    let mut state = loaded(4);
    assert!(flip(&mut state, "p2-emoji").is_empty());
    let effects = flip(&mut state, "p2-word");
    assert!(effects.is_empty());
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(state.move_count, 1);
    assert!(state.card("p2-word").unwrap().is_matched);
    assert!(state.card("p2-emoji").unwrap().is_matched);
    assert!(state.matched_pair_keys.contains("pair-2"));
    assert!(state.selected.is_empty());
}

#[test]
fn matched_cards_cannot_be_reselected() {
    let mut state = loaded(4);
    match_pair(&mut state, 0);
    assert!(flip(&mut state, "p0-word").is_empty());
    assert!(state.selected.is_empty());
    assert_eq!(state.move_count, 1);
}

#[test]
fn mismatch_waits_for_reset_timer() {
    let mut state = loaded(4);
    flip(&mut state, "p0-word");
    let effects = flip(&mut state, "p1-emoji");
    assert_eq!(
        effects,
        vec![Effect::StartTimer {
            session_id: 1,
            timer: TimerKind::MismatchReset,
            after: MISMATCH_RESET_DELAY,
        }]
    );
    assert_eq!(state.phase, Phase::Resolving);
    assert_eq!(state.move_count, 1);

    // A third flip while resolving is ignored.
    assert!(flip(&mut state, "p2-word").is_empty());
    assert!(!state.card("p2-word").unwrap().is_flipped);

    fire(&mut state, TimerKind::MismatchReset);
    assert_eq!(state.phase, Phase::Active);
    assert!(!state.card("p0-word").unwrap().is_flipped);
    assert!(!state.card("p1-emoji").unwrap().is_flipped);
    assert!(!state.card("p0-word").unwrap().is_matched);
    assert!(state.selected.is_empty());
}

#[test]
fn flipping_the_same_card_twice_is_ignored() {
    let mut state = loaded(4);
    flip(&mut state, "p3-word");
    assert!(flip(&mut state, "p3-word").is_empty());
    assert_eq!(state.selected.len(), 1);
    assert_eq!(state.move_count, 0);
}

#[test]
fn unknown_card_is_rejected() {
    let mut state = loaded(4);
    let err = apply(
        &mut state,
        Event::Flip {
            card_id: "p42-word".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::UnknownCard));
}

#[test]
fn win_is_reported_once_after_delay() {
    let mut state = loaded(4);
    for i in 0..3 {
        match_pair(&mut state, i);
    }
    flip(&mut state, "p3-word");
    let effects = flip(&mut state, "p3-emoji");
    assert_eq!(state.phase, Phase::Won);
    assert_eq!(
        effects,
        vec![
            Effect::CancelTimer {
                session_id: 1,
                timer: TimerKind::Tick,
            },
            Effect::StartTimer {
                session_id: 1,
                timer: TimerKind::WinReport,
                after: WIN_REPORT_DELAY,
            },
        ]
    );
    assert_eq!(state.matched_pair_keys.len(), state.deck.len() / 2);

    // Further flips after the win change nothing.
    assert!(flip(&mut state, "p0-word").is_empty());

    let report = fire(&mut state, TimerKind::WinReport);
    assert_eq!(
        report,
        vec![Effect::ReportOutcome(SessionOutcome {
            won: true,
            move_count: 4,
            elapsed_seconds: 0,
        })]
    );
    assert!(fire(&mut state, TimerKind::WinReport).is_empty());
}

#[test]
fn exit_reports_loss_with_moves() {
    let mut state = loaded(4);
    match_pair(&mut state, 0);
    flip(&mut state, "p1-word");
    flip(&mut state, "p2-word");
    let effects = apply(&mut state, Event::Exit).unwrap();
    assert_eq!(state.phase, Phase::Exited);
    assert_eq!(
        effects.last(),
        Some(&Effect::ReportOutcome(SessionOutcome {
            won: false,
            move_count: 2,
            elapsed_seconds: 0,
        }))
    );
    assert!(apply(&mut state, Event::Exit).unwrap().is_empty());
}

#[test]
fn exit_while_loading_reports_nothing() {
    let mut state = SessionState::new(1);
    assert!(apply(&mut state, Event::Exit).unwrap().is_empty());
    assert_eq!(state.phase, Phase::Exited);
}

#[test]
fn exit_after_win_is_ignored() {
    let mut state = loaded(4);
    for i in 0..4 {
        match_pair(&mut state, i);
    }
    assert!(apply(&mut state, Event::Exit).unwrap().is_empty());
    assert_eq!(state.phase, Phase::Won);
}

#[test]
fn ticks_only_count_while_live() {
    let mut state = SessionState::new(1);
    fire(&mut state, TimerKind::Tick);
    assert_eq!(state.elapsed_seconds, 0);

    let mut state = loaded(4);
    fire(&mut state, TimerKind::Tick);
    flip(&mut state, "p0-word");
    flip(&mut state, "p1-word");
    fire(&mut state, TimerKind::Tick);
    assert_eq!(state.elapsed_seconds, 2);

    apply(&mut state, Event::Exit).unwrap();
    fire(&mut state, TimerKind::Tick);
    assert_eq!(state.elapsed_seconds, 2);
}

#[test]
fn reset_cancels_timers_and_discards_stale_events() {
    let mut state = loaded(4);
    flip(&mut state, "p0-word");
    flip(&mut state, "p1-word");

    let effects = apply(&mut state, Event::Reset).unwrap();
    assert_eq!(effects.len(), 3);
    assert!(effects
        .iter()
        .all(|e| matches!(e, Effect::CancelTimer { session_id: 1, .. })));
    assert_eq!(state.session_id, 2);
    assert_eq!(state.phase, Phase::Loading);
    assert!(state.deck.is_empty());

    // The old session's reset timer and deck must not touch the new session.
    let stale = apply(
        &mut state,
        Event::TimerFired {
            session_id: 1,
            timer: TimerKind::MismatchReset,
        },
    )
    .unwrap();
    assert!(stale.is_empty());
    let stale_deck = build_deck_seeded(&distinct_pairs(4), 1);
    assert!(apply(
        &mut state,
        Event::DeckLoaded {
            session_id: 1,
            deck: stale_deck,
        },
    )
    .unwrap()
    .is_empty());
    assert_eq!(state.phase, Phase::Loading);
}

#[test]
fn flips_before_load_are_ignored() {
    let mut state = SessionState::new(1);
    assert!(flip(&mut state, "p0-word").is_empty());
    assert!(state.selected.is_empty());
}
