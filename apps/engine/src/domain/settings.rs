//! Player configuration: session mode, language and the active provider.

use serde::{Deserialize, Serialize};

use crate::domain::progression::GameStats;
use crate::domain::rules::{is_valid_custom_pair_count, DEFAULT_PAIR_COUNT};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::sourcing::provider::DEFAULT_ACTIVE_PROVIDER_ID;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Language name as written into generation prompts.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese (Simplified)",
        }
    }

    /// Topic used when a custom session is started without one.
    pub fn default_topic(self) -> &'static str {
        match self {
            Language::En => "Random",
            Language::Zh => "随机",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Adventure,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub language: Language,
    pub session_topic: Option<String>,
    pub session_pair_count: u8,
    /// 1-based adventure level being played.
    pub current_level: u32,
    #[serde(alias = "activeModelConfigId")]
    pub active_provider_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Adventure,
            language: Language::En,
            session_topic: Some(String::new()),
            session_pair_count: DEFAULT_PAIR_COUNT,
            current_level: 1,
            active_provider_id: DEFAULT_ACTIVE_PROVIDER_ID.to_string(),
        }
    }
}

impl GameConfig {
    /// Point the next session at the adventure frontier.
    pub fn start_adventure(&mut self, stats: &GameStats) {
        self.mode = GameMode::Adventure;
        self.current_level = stats.unlocked_adventure_level.max(1);
        self.session_pair_count = DEFAULT_PAIR_COUNT;
    }

    pub fn start_custom(&mut self, topic: &str, pair_count: u8) -> Result<(), DomainError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyTopic,
                "Custom sessions need a topic",
            ));
        }
        if !is_valid_custom_pair_count(pair_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPairCount,
                format!("Pair count must be one of 6, 8, 10, 12 (got {pair_count})"),
            ));
        }
        self.mode = GameMode::Custom;
        self.session_topic = Some(topic.to_string());
        self.session_pair_count = pair_count;
        Ok(())
    }

    /// Move to the following adventure level after a win.
    pub fn advance_level(&mut self) {
        if self.mode == GameMode::Adventure {
            self.current_level = self.current_level.saturating_add(1);
        }
    }

    /// Topic for the custom path, defaulting per language when blank.
    pub fn topic_or_default(&self) -> String {
        match self.session_topic.as_deref().map(str::trim) {
            Some(topic) if !topic.is_empty() => topic.to_string(),
            _ => self.language.default_topic().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let config = GameConfig::default();
        assert_eq!(config.mode, GameMode::Adventure);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.session_pair_count, 8);
        assert_eq!(config.current_level, 1);
        assert_eq!(config.active_provider_id, "default-gemini");
    }

    #[test]
    fn start_adventure_uses_unlocked_level() {
        let mut config = GameConfig::default();
        let stats = GameStats {
            unlocked_adventure_level: 4,
            ..GameStats::default()
        };
        config.session_pair_count = 12;
        config.start_adventure(&stats);
        assert_eq!(config.mode, GameMode::Adventure);
        assert_eq!(config.current_level, 4);
        assert_eq!(config.session_pair_count, 8);
    }

    #[test]
    fn start_custom_validates_topic_and_count() {
        let mut config = GameConfig::default();
        let err = config.start_custom("   ", 8).unwrap_err();
        assert_eq!(err.kind(), Some(&ValidationKind::EmptyTopic));
        let err = config.start_custom("Space", 7).unwrap_err();
        assert_eq!(err.kind(), Some(&ValidationKind::InvalidPairCount));
        assert_eq!(config.mode, GameMode::Adventure);

        config.start_custom("  Space ", 10).unwrap();
        assert_eq!(config.mode, GameMode::Custom);
        assert_eq!(config.session_topic.as_deref(), Some("Space"));
        assert_eq!(config.session_pair_count, 10);
    }

    #[test]
    fn blank_topic_defaults_per_language() {
        let mut config = GameConfig {
            session_topic: None,
            ..GameConfig::default()
        };
        assert_eq!(config.topic_or_default(), "Random");
        config.language = Language::Zh;
        config.session_topic = Some("  ".into());
        assert_eq!(config.topic_or_default(), "随机");
    }

    #[test]
    fn advance_level_only_in_adventure() {
        let mut config = GameConfig::default();
        config.advance_level();
        assert_eq!(config.current_level, 2);
        config.start_custom("Food", 6).unwrap();
        config.advance_level();
        assert_eq!(config.current_level, 2);
    }

    #[test]
    fn deserializes_stored_camel_case_with_missing_fields() {
        let raw = serde_json::json!({
            "mode": "custom",
            "language": "zh",
            "sessionTopic": "Marvel",
            "activeModelConfigId": "gpt-4o"
        });
        let config: GameConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(config.mode, GameMode::Custom);
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.session_pair_count, 8);
        assert_eq!(config.active_provider_id, "gpt-4o");
    }
}
