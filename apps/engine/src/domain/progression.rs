//! Aggregate statistics and adventure unlocking.

use serde::{Deserialize, Serialize};

use crate::domain::settings::{GameConfig, GameMode};

/// Cumulative, locally persisted counters.
///
/// `best_moves` is `None` until the first win (serialized as `null`, which is
/// also how a stored "infinity" sentinel comes back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub games_played: u32,
    pub total_wins: u32,
    #[serde(alias = "bestScore")]
    pub best_moves: Option<u32>,
    pub total_moves: u64,
    #[serde(alias = "adventureLevel")]
    pub unlocked_adventure_level: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            total_wins: 0,
            best_moves: None,
            total_moves: 0,
            unlocked_adventure_level: 1,
        }
    }
}

impl GameStats {
    /// Percentage of sessions won, rounded half up; 0 before any session.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        let wins = u64::from(self.total_wins);
        let played = u64::from(self.games_played);
        ((wins * 200 + played) / (played * 2)) as u32
    }
}

/// Fold one finished session into `stats`.
///
/// Pure: the caller persists the returned value. The unlocked level only
/// advances when the win happened at the frontier, not on a replay.
pub fn record_outcome(stats: &GameStats, config: &GameConfig, won: bool, move_count: u32) -> GameStats {
    let mut next = stats.clone();
    next.games_played = next.games_played.saturating_add(1);
    next.total_moves = next.total_moves.saturating_add(move_count as u64);

    if won {
        next.total_wins = next.total_wins.saturating_add(1);
        next.best_moves = Some(match stats.best_moves {
            Some(best) => best.min(move_count),
            None => move_count,
        });
        if config.mode == GameMode::Adventure
            && config.current_level == stats.unlocked_adventure_level
        {
            next.unlocked_adventure_level = stats.unlocked_adventure_level.saturating_add(1);
        }
    }

    next
}
