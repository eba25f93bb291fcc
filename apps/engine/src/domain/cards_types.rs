use serde::{Deserialize, Serialize};

/// A (word, emoji) association; the unit the deck is built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub word: String,
    pub emoji: String,
}

impl Pair {
    pub fn new(word: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            emoji: emoji.into(),
        }
    }

    /// Both halves carry visible content.
    pub fn is_complete(&self) -> bool {
        !self.word.trim().is_empty() && !self.emoji.trim().is_empty()
    }
}

/// Which half of a pair a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Word,
    Emoji,
}

impl CardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Word => "word",
            CardKind::Emoji => "emoji",
        }
    }
}

/// One addressable card on the board.
///
/// `is_flipped` / `is_matched` are only mutated by the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub content: String,
    pub kind: CardKind,
    pub pair_key: String,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub color_bucket: u8,
}

impl Card {
    /// A card can be picked when it is face down and not yet matched.
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}
