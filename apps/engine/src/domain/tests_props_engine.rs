//! Property tests for the deck builder and the turn state machine.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::cards_types::CardKind;
use crate::domain::dealing::build_deck_seeded;
use crate::domain::match_engine::{apply, Effect, Event, TimerKind};
use crate::domain::state::{Phase, SessionState};
use crate::domain::test_gens::{deck_case, distinct_pairs, flip_script};
use crate::domain::test_prelude;

fn loaded(pairs: usize, seed: u64) -> SessionState {
    let mut state = SessionState::new(1);
    let deck = build_deck_seeded(&distinct_pairs(pairs), seed);
    apply(
        &mut state,
        Event::DeckLoaded {
            session_id: 1,
            deck,
        },
    )
    .unwrap();
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every pair key appears on exactly two cards, one per kind.
    #[test]
    fn prop_deck_pairs_are_complete((pairs, seed) in deck_case()) {
        let deck = build_deck_seeded(&distinct_pairs(pairs), seed);
        prop_assert_eq!(deck.len(), pairs * 2);

        let mut by_key: HashMap<&str, Vec<CardKind>> = HashMap::new();
        for card in &deck {
            by_key.entry(card.pair_key.as_str()).or_default().push(card.kind);
            prop_assert!(!card.is_flipped && !card.is_matched);
        }
        prop_assert_eq!(by_key.len(), pairs);
        for kinds in by_key.values() {
            prop_assert_eq!(kinds.len(), 2);
            prop_assert!(kinds.contains(&CardKind::Word));
            prop_assert!(kinds.contains(&CardKind::Emoji));
        }
    }

    /// Property: the shuffle permutes ids and never invents or drops a card.
    #[test]
    fn prop_shuffle_is_permutation((pairs, seed) in deck_case()) {
        let mut ids: Vec<String> = build_deck_seeded(&distinct_pairs(pairs), seed)
            .into_iter()
            .map(|c| c.id)
            .collect();
        ids.sort();
        let mut expected: Vec<String> = (0..pairs)
            .flat_map(|i| [format!("p{i}-emoji"), format!("p{i}-word")])
            .collect();
        expected.sort();
        prop_assert_eq!(ids, expected);
    }

    /// Property: under any flip sequence, selection stays within two cards,
    /// moves count completed selections, and matched cards stay matched.
    #[test]
    fn prop_engine_invariants_hold(
        (pairs, seed) in deck_case(),
        script in flip_script(120),
    ) {
        let mut state = loaded(pairs, seed);
        let mut completed = 0u32;
        let mut reports = 0usize;

        for pick in script {
            let idx = pick % state.deck.len();
            let id = state.deck[idx].id.clone();
            let was_matched: Vec<String> = state
                .deck
                .iter()
                .filter(|c| c.is_matched)
                .map(|c| c.id.clone())
                .collect();
            let moves_before = state.move_count;

            let effects = apply(&mut state, Event::Flip { card_id: id }).unwrap();
            if state.move_count > moves_before {
                completed += 1;
            }
            prop_assert!(state.move_count - moves_before <= 1);
            prop_assert!(state.selected.len() <= 2);
            for matched in &was_matched {
                prop_assert!(state.card(matched).unwrap().is_matched);
            }

            for effect in effects {
                if let Effect::StartTimer { session_id, timer, .. } = effect {
                    let fired = apply(&mut state, Event::TimerFired { session_id, timer }).unwrap();
                    reports += fired
                        .iter()
                        .filter(|e| matches!(e, Effect::ReportOutcome(_)))
                        .count();
                }
            }
        }

        prop_assert_eq!(state.move_count, completed);
        prop_assert_eq!(
            state.phase == Phase::Won,
            state.matched_pair_keys.len() == state.deck.len() / 2
        );
        prop_assert!(reports <= 1);
        if state.phase == Phase::Won {
            prop_assert_eq!(reports, 1);
        }
    }

    /// Property: a perfect player wins in exactly one move per pair.
    #[test]
    fn prop_perfect_play_wins_in_pair_count_moves((pairs, seed) in deck_case()) {
        let mut state = loaded(pairs, seed);
        let mut reports = Vec::new();
        for i in 0..pairs {
            apply(&mut state, Event::Flip { card_id: format!("p{i}-word") }).unwrap();
            let effects = apply(&mut state, Event::Flip { card_id: format!("p{i}-emoji") }).unwrap();
            for effect in effects {
                if let Effect::StartTimer { session_id, timer: TimerKind::WinReport, .. } = effect {
                    reports.extend(
                        apply(&mut state, Event::TimerFired { session_id, timer: TimerKind::WinReport }).unwrap(),
                    );
                }
            }
        }
        prop_assert_eq!(state.phase, Phase::Won);
        prop_assert_eq!(state.move_count as usize, pairs);
        prop_assert_eq!(reports.len(), 1);
    }
}
