// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::cards_types::Pair;
use crate::domain::rules::CUSTOM_PAIR_COUNTS;

/// One of the pair counts a custom session accepts.
pub fn custom_pair_count() -> impl Strategy<Value = usize> {
    prop::sample::select(CUSTOM_PAIR_COUNTS.to_vec()).prop_map(usize::from)
}

/// `count` pairs with distinct words and emoji so cards are told apart by content.
pub fn distinct_pairs(count: usize) -> Vec<Pair> {
    (0..count)
        .map(|i| Pair::new(format!("word{i}"), format!("e{i}")))
        .collect()
}

/// Pair count plus a deck seed.
pub fn deck_case() -> impl Strategy<Value = (usize, u64)> {
    (custom_pair_count(), any::<u64>())
}

/// A sequence of card picks, as indices into the deck (wrapped at use).
pub fn flip_script(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..64, 0..max_len)
}
