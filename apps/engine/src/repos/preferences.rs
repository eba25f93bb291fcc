//! Preference repository: three JSON blobs addressed by logical key.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    GameConfig,
    GameStats,
    ProviderConfigs,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 3] = [
        PreferenceKey::GameConfig,
        PreferenceKey::GameStats,
        PreferenceKey::ProviderConfigs,
    ];

    /// Name the blob is stored under.
    pub fn storage_name(self) -> &'static str {
        match self {
            PreferenceKey::GameConfig => "emoji_link_config",
            PreferenceKey::GameStats => "emoji_link_stats",
            PreferenceKey::ProviderConfigs => "emoji_link_ai_configs",
        }
    }
}

/// Get/set over opaque JSON. Absence is `Ok(None)`, never an error.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, key: PreferenceKey) -> Result<Option<Value>, AppError>;

    async fn save(&self, key: PreferenceKey, value: &Value) -> Result<(), AppError>;
}
