//! Per-game metrics for simulation output.

use engine::sourcing::PairOrigin;
use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub deck_seed: u64,
    pub timestamp: String,
    pub config: GameConfigMetrics,
    pub result: GameResultMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfigMetrics {
    pub mode: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub bot: String,
    pub memory_level: u8,
    pub provider_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub won: bool,
    pub abandoned: bool,
    pub pair_count: usize,
    pub move_count: u32,
    pub flips: u32,
    pub elapsed_seconds: u32,
    /// Pairs per move; 1.0 is a flawless game.
    pub efficiency: f64,
    #[serde(flatten)]
    pub origin: PairOrigin,
    pub duration_ms: f64,
}

pub fn efficiency(pair_count: usize, move_count: u32) -> f64 {
    if move_count == 0 {
        return 0.0;
    }
    pair_count as f64 / f64::from(move_count)
}

pub fn build_game_metrics(
    game_id: u32,
    deck_seed: u64,
    config: GameConfigMetrics,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string());

    GameMetrics {
        game_id,
        deck_seed,
        timestamp,
        config,
        result: GameResultMetrics {
            won: result.outcome.won,
            abandoned: result.abandoned,
            pair_count: result.pair_count,
            move_count: result.outcome.move_count,
            flips: result.flips,
            elapsed_seconds: result.outcome.elapsed_seconds,
            efficiency: efficiency(result.pair_count, result.outcome.move_count),
            origin: result.origin.clone(),
            duration_ms,
        },
    }
}

/// Flat row for the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub deck_seed: u64,
    pub mode: String,
    pub level: Option<u32>,
    pub bot: String,
    pub pair_count: usize,
    pub won: bool,
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub efficiency: f64,
    pub fallback: bool,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            deck_seed: metrics.deck_seed,
            mode: metrics.config.mode.clone(),
            level: metrics.config.level,
            bot: metrics.config.bot.clone(),
            pair_count: metrics.result.pair_count,
            won: metrics.result.won,
            move_count: metrics.result.move_count,
            elapsed_seconds: metrics.result.elapsed_seconds,
            efficiency: metrics.result.efficiency,
            fallback: metrics.result.origin.is_fallback(),
        }
    }
}

/// Running totals printed at the end of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub games: u32,
    pub wins: u32,
    pub fallbacks: u32,
    pub total_moves: u64,
    pub total_elapsed: u64,
}

impl RunSummary {
    pub fn add(&mut self, metrics: &GameMetrics) {
        self.games += 1;
        if metrics.result.won {
            self.wins += 1;
        }
        if metrics.result.origin.is_fallback() {
            self.fallbacks += 1;
        }
        self.total_moves += u64::from(metrics.result.move_count);
        self.total_elapsed += u64::from(metrics.result.elapsed_seconds);
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.wins) * 100.0 / f64::from(self.games)
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / f64::from(self.games)
    }
}
