//! Provider configurations: which remote generator to call and how to reach it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sourcing::registry::{profile_for, ProviderProfile};

pub const DEFAULT_ACTIVE_PROVIDER_ID: &str = "default-gemini";

/// Model used for native-schema requests when a config leaves it blank.
pub const DEFAULT_NATIVE_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "other")]
    Other,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Google => "google",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Other => "other",
        }
    }

    pub fn profile(self) -> &'static ProviderProfile {
        profile_for(self)
    }
}

/// One entry of the persisted provider list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub id: String,
    pub name: String,
    pub provider: ProviderKind,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model_name: String,
}

impl ProviderConfig {
    /// Fresh user-added entry with a unique `custom-` id.
    pub fn new_custom() -> Self {
        Self {
            id: format!("custom-{}", Uuid::new_v4()),
            name: "New Config".to_string(),
            provider: ProviderKind::OpenAi,
            api_key: String::new(),
            base_url: None,
            model_name: "gpt-3.5-turbo".to_string(),
        }
    }

    /// Endpoint root for this config, without a trailing slash.
    ///
    /// Order: the config's own override, then the kind's default, then the
    /// caller's default. `None` when none of them is set.
    pub fn resolve_base_url(&self, caller_default: Option<&str>) -> Option<String> {
        self.base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.provider.profile().default_base_url)
            .or(caller_default.filter(|s| !s.trim().is_empty()))
            .map(|s| s.trim().trim_end_matches('/').to_string())
    }

    /// The config's credential, or the ambient one when the config has none.
    pub fn credential<'a>(&'a self, ambient: Option<&'a str>) -> Option<&'a str> {
        Some(self.api_key.trim())
            .filter(|k| !k.is_empty())
            .or(ambient.map(str::trim).filter(|k| !k.is_empty()))
    }
}

/// The built-in provider list used when nothing has been saved yet.
pub fn default_provider_configs() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            id: DEFAULT_ACTIVE_PROVIDER_ID.to_string(),
            name: "Gemini (Default)".to_string(),
            provider: ProviderKind::Google,
            api_key: String::new(),
            base_url: None,
            model_name: DEFAULT_NATIVE_MODEL.to_string(),
        },
        ProviderConfig {
            id: "deepseek-v3".to_string(),
            name: "DeepSeek V3".to_string(),
            provider: ProviderKind::DeepSeek,
            api_key: String::new(),
            base_url: Some("https://api.deepseek.com".to_string()),
            model_name: "deepseek-chat".to_string(),
        },
        ProviderConfig {
            id: "gpt-4o".to_string(),
            name: "GPT-4o".to_string(),
            provider: ProviderKind::OpenAi,
            api_key: String::new(),
            base_url: None,
            model_name: "gpt-4o".to_string(),
        },
        ProviderConfig {
            id: "local-ollama".to_string(),
            name: "Ollama (Local)".to_string(),
            provider: ProviderKind::Ollama,
            api_key: "ollama".to_string(),
            base_url: Some("http://localhost:11434/v1".to_string()),
            model_name: "llama3".to_string(),
        },
    ]
}
