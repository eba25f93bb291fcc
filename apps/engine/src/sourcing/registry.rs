//! How a provider kind is called
//!
//! Each kind maps to one static profile: the request shape it speaks, the
//! endpoint used when a config has no override, and whether a credential is
//! mandatory. Keep the table ordered like [`ProviderKind`].

use crate::sourcing::provider::ProviderKind;

/// Wire shape of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// Single call with a declared structured-output schema.
    NativeSchema,
    /// `POST {base}/chat/completions` with a JSON-object response format.
    ChatCompletions,
}

#[derive(Debug)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub shape: RequestShape,
    pub default_base_url: Option<&'static str>,
    pub requires_credential: bool,
}

static PROVIDER_PROFILES: [ProviderProfile; 5] = [
    ProviderProfile {
        kind: ProviderKind::OpenAi,
        shape: RequestShape::ChatCompletions,
        default_base_url: Some("https://api.openai.com/v1"),
        requires_credential: true,
    },
    ProviderProfile {
        kind: ProviderKind::Google,
        shape: RequestShape::NativeSchema,
        default_base_url: Some("https://generativelanguage.googleapis.com/v1beta"),
        requires_credential: true,
    },
    ProviderProfile {
        kind: ProviderKind::DeepSeek,
        shape: RequestShape::ChatCompletions,
        default_base_url: Some("https://api.deepseek.com"),
        requires_credential: true,
    },
    ProviderProfile {
        kind: ProviderKind::Ollama,
        shape: RequestShape::ChatCompletions,
        default_base_url: Some("http://localhost:11434/v1"),
        requires_credential: false,
    },
    ProviderProfile {
        kind: ProviderKind::Other,
        shape: RequestShape::ChatCompletions,
        default_base_url: None,
        requires_credential: false,
    },
];

/// Returns the statically registered provider profiles.
pub fn registered_providers() -> &'static [ProviderProfile] {
    &PROVIDER_PROFILES
}

pub fn profile_for(kind: ProviderKind) -> &'static ProviderProfile {
    let index = match kind {
        ProviderKind::OpenAi => 0,
        ProviderKind::Google => 1,
        ProviderKind::DeepSeek => 2,
        ProviderKind::Ollama => 3,
        ProviderKind::Other => 4,
    };
    &PROVIDER_PROFILES[index]
}
