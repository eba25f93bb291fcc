//! Scripted players.
//!
//! A bot only learns what a human would: the content of cards that were face
//! up in a snapshot. Recall is degraded by `memory_level` (0-100, where 100
//! is perfect) with a seeded rng so runs are reproducible.

use std::collections::{HashMap, HashSet};

use engine::domain::SessionSnapshot;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub trait Player {
    fn name(&self) -> &str;

    /// Pick the next card. `None` when nothing is selectable.
    fn choose(&mut self, snapshot: &SessionSnapshot) -> Option<String>;

    /// Look at the board after a move.
    fn observe(&mut self, snapshot: &SessionSnapshot);
}

pub struct MemoryBot {
    name: &'static str,
    memory_level: u8,
    rng: StdRng,
    /// card id -> pair key, for face-down cards the bot still recalls.
    recalled: HashMap<String, String>,
    /// Cards face up in the last observed snapshot.
    face_up: HashSet<String>,
}

impl MemoryBot {
    pub fn new(name: &'static str, memory_level: u8, seed: u64) -> Self {
        Self {
            name,
            memory_level: memory_level.min(100),
            rng: StdRng::seed_from_u64(seed),
            recalled: HashMap::new(),
            face_up: HashSet::new(),
        }
    }

    fn remembers(&mut self) -> bool {
        match self.memory_level {
            0 => false,
            100 => true,
            level => self.rng.random_bool(f64::from(level) / 100.0),
        }
    }

    fn recalled_partner(&self, snapshot: &SessionSnapshot, card_id: &str, pair_key: &str) -> Option<String> {
        snapshot
            .selectable_ids()
            .find(|id| *id != card_id && self.recalled.get(*id).is_some_and(|k| k == pair_key))
            .map(str::to_string)
    }

    fn recalled_pair(&self, snapshot: &SessionSnapshot) -> Option<String> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for id in snapshot.selectable_ids() {
            let Some(key) = self.recalled.get(id) else {
                continue;
            };
            if seen.contains_key(key.as_str()) {
                return Some(id.to_string());
            }
            seen.insert(key.as_str(), id);
        }
        None
    }

    /// An unexplored card if any, otherwise any selectable card.
    fn explore(&mut self, snapshot: &SessionSnapshot) -> Option<String> {
        let unknown: Vec<&str> = snapshot
            .selectable_ids()
            .filter(|id| !self.recalled.contains_key(*id))
            .collect();
        let pool: Vec<&str> = if unknown.is_empty() {
            snapshot.selectable_ids().collect()
        } else {
            unknown
        };
        pool.choose(&mut self.rng).map(|id| id.to_string())
    }
}

impl Player for MemoryBot {
    fn name(&self) -> &str {
        self.name
    }

    fn choose(&mut self, snapshot: &SessionSnapshot) -> Option<String> {
        let first_pick = snapshot.cards.iter().find(|c| c.is_flipped && !c.is_matched);
        let known = match first_pick {
            Some(card) => self.recalled_partner(snapshot, &card.id, &card.pair_key),
            None => self.recalled_pair(snapshot),
        };
        known.or_else(|| self.explore(snapshot))
    }

    fn observe(&mut self, snapshot: &SessionSnapshot) {
        let mut now_up = HashSet::new();
        for card in &snapshot.cards {
            if card.is_matched {
                self.recalled.remove(&card.id);
                continue;
            }
            if !card.is_flipped {
                continue;
            }
            now_up.insert(card.id.clone());
            // Roll once per reveal, not once per snapshot.
            if !self.face_up.contains(&card.id) && self.remembers() {
                self.recalled.insert(card.id.clone(), card.pair_key.clone());
            }
        }
        self.face_up = now_up;
    }
}

#[cfg(test)]
mod tests {
    use engine::domain::{apply, build_deck_seeded, Event, Pair, SessionState};

    use super::*;

    fn loaded(pairs: usize) -> SessionState {
        let pairs: Vec<Pair> = (0..pairs).map(|i| Pair::new(format!("w{i}"), format!("e{i}"))).collect();
        let mut state = SessionState::new(1);
        apply(
            &mut state,
            Event::DeckLoaded {
                session_id: 1,
                deck: build_deck_seeded(&pairs, 9),
            },
        )
        .unwrap();
        state
    }

    #[test]
    fn picks_only_selectable_cards() {
        let state = loaded(3);
        let snapshot = SessionSnapshot::of(&state);
        let mut bot = MemoryBot::new("Random", 0, 1);
        let id = bot.choose(&snapshot).unwrap();
        assert!(snapshot.selectable_ids().any(|s| s == id));
    }

    #[test]
    fn perfect_memory_completes_a_seen_pair() {
        let mut state = loaded(2);
        let target = state.deck[0].pair_key.clone();
        let partner = state
            .deck
            .iter()
            .skip(1)
            .find(|c| c.pair_key == target)
            .map(|c| c.id.clone())
            .unwrap();

        let mut bot = MemoryBot::new("Perfect", 100, 1);
        // Reveal the partner first so it is recalled.
        state.deck.iter_mut().find(|c| c.id == partner).unwrap().is_flipped = true;
        bot.observe(&SessionSnapshot::of(&state));
        state.deck.iter_mut().for_each(|c| c.is_flipped = false);
        bot.observe(&SessionSnapshot::of(&state));

        let first = state.deck[0].id.clone();
        apply(&mut state, Event::Flip { card_id: first }).unwrap();
        let snapshot = SessionSnapshot::of(&state);
        bot.observe(&snapshot);
        assert_eq!(bot.choose(&snapshot), Some(partner));
    }

    #[test]
    fn zero_memory_recalls_nothing() {
        let mut state = loaded(2);
        state.deck.iter_mut().for_each(|c| c.is_flipped = true);
        let mut bot = MemoryBot::new("Random", 0, 1);
        bot.observe(&SessionSnapshot::of(&state));
        assert!(bot.recalled.is_empty());
    }

    #[test]
    fn empty_board_yields_no_choice() {
        let snapshot = SessionSnapshot::of(&SessionState::new(1));
        let mut bot = MemoryBot::new("Perfect", 100, 1);
        assert_eq!(bot.choose(&snapshot), None);
    }
}
