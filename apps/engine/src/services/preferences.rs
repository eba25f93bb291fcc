//! Player preferences: config, stats and the provider list, loaded together
//! at session start and written back after mutation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::match_engine::SessionOutcome;
use crate::domain::progression::{record_outcome, GameStats};
use crate::domain::settings::{GameConfig, Language};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::preferences::{PreferenceKey, PreferenceStore};
use crate::sourcing::provider::{default_provider_configs, ProviderConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub config: GameConfig,
    pub stats: GameStats,
    /// Never empty.
    providers: Vec<ProviderConfig>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            stats: GameStats::default(),
            providers: default_provider_configs(),
        }
    }
}

/// Typed record for `key`; absent or unparseable blobs become `T::default()`.
async fn load_record<T: DeserializeOwned + Default>(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
) -> Result<T, AppError> {
    let Some(value) = store.load(key).await? else {
        debug!(key = key.storage_name(), "no stored preferences, using defaults");
        return Ok(T::default());
    };
    match serde_json::from_value(value) {
        Ok(record) => Ok(record),
        Err(e) => {
            warn!(key = key.storage_name(), error = %e, "unparseable preferences, using defaults");
            Ok(T::default())
        }
    }
}

async fn save_record<T: Serialize>(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
    record: &T,
) -> Result<(), AppError> {
    let value = serde_json::to_value(record)?;
    store.save(key, &value).await
}

impl Preferences {
    pub async fn load(store: &dyn PreferenceStore) -> Result<Self, AppError> {
        let config: GameConfig = load_record(store, PreferenceKey::GameConfig).await?;
        let stats: GameStats = load_record(store, PreferenceKey::GameStats).await?;
        let mut providers: Vec<ProviderConfig> =
            load_record(store, PreferenceKey::ProviderConfigs).await?;
        if providers.is_empty() {
            providers = default_provider_configs();
        }
        Ok(Self {
            config,
            stats,
            providers,
        })
    }

    pub async fn save(&self, store: &dyn PreferenceStore) -> Result<(), AppError> {
        save_record(store, PreferenceKey::GameConfig, &self.config).await?;
        save_record(store, PreferenceKey::GameStats, &self.stats).await?;
        save_record(store, PreferenceKey::ProviderConfigs, &self.providers).await
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    /// The selected provider, or the first one when the stored id is gone.
    pub fn active_provider(&self) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.id == self.config.active_provider_id)
            .or_else(|| self.providers.first())
    }

    pub fn select_provider(&mut self, id: &str) -> Result<(), DomainError> {
        if !self.providers.iter().any(|p| p.id == id) {
            return Err(unknown_provider(id));
        }
        self.config.active_provider_id = id.to_string();
        Ok(())
    }

    /// Append a fresh custom config and return its id. Selection is unchanged.
    pub fn add_provider(&mut self) -> String {
        let config = ProviderConfig::new_custom();
        let id = config.id.clone();
        self.providers.push(config);
        id
    }

    /// Replace the config with the same id.
    pub fn update_provider(&mut self, updated: ProviderConfig) -> Result<(), DomainError> {
        let slot = self
            .providers
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| unknown_provider(&updated.id))?;
        *slot = updated;
        Ok(())
    }

    /// Remove a config. The last one cannot go; removing the active one
    /// reselects the first remaining config.
    pub fn delete_provider(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self
            .providers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| unknown_provider(id))?;
        if self.providers.len() == 1 {
            return Err(DomainError::validation(
                ValidationKind::LastProvider,
                "At least one provider config must remain",
            ));
        }
        self.providers.remove(index);
        if self.config.active_provider_id == id {
            if let Some(first) = self.providers.first() {
                self.config.active_provider_id = first.id.clone();
            }
        }
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.config.language = language;
    }

    pub fn start_adventure(&mut self) {
        self.config.start_adventure(&self.stats);
    }

    pub fn start_custom(&mut self, topic: &str, pair_count: u8) -> Result<(), DomainError> {
        self.config.start_custom(topic, pair_count)
    }

    pub fn next_level(&mut self) {
        self.config.advance_level();
    }

    /// Fold a finished session into the stats.
    pub fn record_outcome(&mut self, outcome: &SessionOutcome) {
        self.stats = record_outcome(&self.stats, &self.config, outcome.won, outcome.move_count);
    }
}

fn unknown_provider(id: &str) -> DomainError {
    DomainError::validation(
        ValidationKind::UnknownProvider,
        format!("No provider config with id {id}"),
    )
}
