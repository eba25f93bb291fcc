//! Deck construction: two cards per pair, then an unbiased shuffle.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, CardKind, Pair};
use crate::domain::rules::{color_bucket, pair_key};

/// RNG used for dealing. Seeded runs reproduce the same deck order on every
/// platform; unseeded runs draw from the OS.
pub fn deck_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Cards for `pairs` in construction order (word card, then emoji card, per pair).
fn pair_cards(pairs: &[Pair]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(pairs.len() * 2);
    for (index, pair) in pairs.iter().enumerate() {
        let key = pair_key(index);
        let color = color_bucket(index);
        for (kind, content) in [(CardKind::Word, &pair.word), (CardKind::Emoji, &pair.emoji)] {
            cards.push(Card {
                id: format!("p{index}-{}", kind.as_str()),
                content: content.clone(),
                kind,
                pair_key: key.clone(),
                is_flipped: false,
                is_matched: false,
                color_bucket: color,
            });
        }
    }
    cards
}

/// Build a shuffled deck from `pairs` using the supplied RNG.
///
/// The shuffle is Fisher-Yates over the full card list, so both cards of a
/// pair may land anywhere, adjacent included. An empty input yields an empty
/// deck; callers treat that as a load failure.
pub fn build_deck<R: Rng + ?Sized>(pairs: &[Pair], rng: &mut R) -> Vec<Card> {
    let mut cards = pair_cards(pairs);
    cards.shuffle(rng);
    cards
}

/// Deterministic variant of [`build_deck`].
pub fn build_deck_seeded(pairs: &[Pair], seed: u64) -> Vec<Card> {
    build_deck(pairs, &mut deck_rng(Some(seed)))
}
