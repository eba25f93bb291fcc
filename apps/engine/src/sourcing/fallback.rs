//! Offline pair list shared by the sentinel topic and the failure path.

use unicode_normalization::UnicodeNormalization;

use crate::domain::cards_types::Pair;

static FALLBACK_PAIRS: [(&str, &str); 16] = [
    ("Pizza", "🍕"),
    ("Burger", "🍔"),
    ("Fries", "🍟"),
    ("Hotdog", "🌭"),
    ("Sushi", "🍣"),
    ("Ramen", "🍜"),
    ("Taco", "🌮"),
    ("Donut", "🍩"),
    ("Cookie", "🍪"),
    ("Cake", "🍰"),
    ("Coffee", "☕"),
    ("Beer", "🍺"),
    ("Wine", "🍷"),
    ("Cocktail", "🍹"),
    ("Ice Cream", "🍦"),
    ("Chocolate", "🍫"),
];

/// Topics that skip generation and go straight to the offline list.
const SENTINEL_TOPICS: [&str; 2] = ["test", "测试"];

pub fn fallback_len() -> usize {
    FALLBACK_PAIRS.len()
}

/// The first `count` offline pairs. Never pads: asking for more than the list
/// holds returns the whole list.
pub fn fallback_pairs(count: usize) -> Vec<Pair> {
    FALLBACK_PAIRS
        .iter()
        .take(count)
        .map(|(word, emoji)| Pair::new(*word, *emoji))
        .collect()
}

/// Case-, width- and whitespace-insensitive match against the sentinel topics.
pub fn is_sentinel_topic(topic: &str) -> bool {
    let normalized: String = topic.nfkc().collect::<String>().trim().to_lowercase();
    SENTINEL_TOPICS.contains(&normalized.as_str())
}
