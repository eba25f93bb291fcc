//! Shared types for the simulator.

use clap::ValueEnum;
use engine::domain::{GameMode, Language};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Adventure,
    Custom,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Adventure => GameMode::Adventure,
            ModeArg::Custom => GameMode::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    Zh,
}

impl From<LanguageArg> for Language {
    fn from(language: LanguageArg) -> Self {
        match language {
            LanguageArg::En => Language::En,
            LanguageArg::Zh => Language::Zh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Remembers every revealed card.
    Perfect,
    /// Remembers a revealed card with probability `--memory-level`/100.
    Forgetful,
    /// Never remembers anything.
    Random,
}

impl BotKind {
    pub fn name(self) -> &'static str {
        match self {
            BotKind::Perfect => "Perfect",
            BotKind::Forgetful => "Forgetful",
            BotKind::Random => "Random",
        }
    }

    /// Recall percentage the bot plays with.
    pub fn memory_level(self, requested: u8) -> u8 {
        match self {
            BotKind::Perfect => 100,
            BotKind::Forgetful => requested.min(100),
            BotKind::Random => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
