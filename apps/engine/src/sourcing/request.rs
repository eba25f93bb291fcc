//! Request shaping and response parsing per provider kind.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::cards_types::Pair;
use crate::domain::settings::Language;
use crate::errors::sourcing::SourcingError;
use crate::sourcing::provider::{ProviderConfig, DEFAULT_NATIVE_MODEL};
use crate::sourcing::registry::RequestShape;

pub const CHAT_TEMPERATURE: f32 = 0.8;
pub const CHAT_USER_TRIGGER: &str = "Generate JSON now.";

/// What to generate.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub topic: &'a str,
    pub count: usize,
    pub language: Language,
}

/// Caller-level defaults applied when a provider config leaves a field empty.
#[derive(Debug, Clone, Default)]
pub struct RequestDefaults {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeBody {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// A fully resolved call, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    NativeSchema {
        endpoint: String,
        api_key: String,
        body: NativeBody,
    },
    ChatCompletions {
        endpoint: String,
        api_key: Option<String>,
        body: ChatBody,
    },
}

impl GenerationRequest {
    pub fn endpoint(&self) -> &str {
        match self {
            GenerationRequest::NativeSchema { endpoint, .. }
            | GenerationRequest::ChatCompletions { endpoint, .. } => endpoint,
        }
    }

    pub fn shape(&self) -> RequestShape {
        match self {
            GenerationRequest::NativeSchema { .. } => RequestShape::NativeSchema,
            GenerationRequest::ChatCompletions { .. } => RequestShape::ChatCompletions,
        }
    }
}

pub fn system_prompt(input: &PromptInput<'_>) -> String {
    format!(
        "Generate exactly {count} pairs of related (word, emoji) based on the topic: \"{topic}\".\n\
         Language: {language}.\n\
         Rules:\n\
         1. Words must be short (max 2 words).\n\
         2. Emojis must be single unicode characters.\n\
         3. Return strictly valid JSON: {{ \"pairs\": [{{ \"word\": \"X\", \"emoji\": \"Y\" }}] }}",
        count = input.count,
        topic = input.topic,
        language = input.language.prompt_name(),
    )
}

pub fn native_prompt(input: &PromptInput<'_>) -> String {
    format!(
        "Topic: {}. Count: {}. Lang: {}. Return JSON pairs of word and emoji.",
        input.topic,
        input.count,
        input.language.code()
    )
}

/// `{pairs: array of {word, emoji}}` in the structured-output schema dialect.
pub fn pairs_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "pairs": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "word": { "type": "STRING" },
                        "emoji": { "type": "STRING" }
                    },
                    "required": ["word", "emoji"]
                }
            }
        },
        "required": ["pairs"]
    })
}

/// Shape a request for `config`.
///
/// Fails with `Configuration` when the kind needs a credential and none is
/// available, or when no endpoint can be resolved.
pub fn build_request(
    config: &ProviderConfig,
    input: &PromptInput<'_>,
    defaults: &RequestDefaults,
) -> Result<GenerationRequest, SourcingError> {
    let profile = config.provider.profile();
    let credential = config
        .credential(defaults.api_key.as_deref())
        .map(str::to_string);
    if profile.requires_credential && credential.is_none() {
        return Err(SourcingError::configuration(format!(
            "provider {} requires an API key",
            config.provider.as_str()
        )));
    }
    let base = config
        .resolve_base_url(defaults.base_url.as_deref())
        .ok_or_else(|| {
            SourcingError::configuration(format!("no endpoint for provider config {}", config.id))
        })?;
    let model = config.model_name.trim();

    match profile.shape {
        RequestShape::NativeSchema => {
            let model = if model.is_empty() {
                DEFAULT_NATIVE_MODEL
            } else {
                model
            };
            Ok(GenerationRequest::NativeSchema {
                endpoint: format!("{base}/models/{model}:generateContent"),
                api_key: credential.unwrap_or_default(),
                body: NativeBody {
                    contents: vec![Content {
                        parts: vec![TextPart {
                            text: native_prompt(input),
                        }],
                    }],
                    generation_config: GenerationConfig {
                        response_mime_type: "application/json",
                        response_schema: pairs_schema(),
                    },
                },
            })
        }
        RequestShape::ChatCompletions => {
            if model.is_empty() {
                return Err(SourcingError::configuration(format!(
                    "provider config {} has no model name",
                    config.id
                )));
            }
            Ok(GenerationRequest::ChatCompletions {
                endpoint: format!("{base}/chat/completions"),
                api_key: credential,
                body: ChatBody {
                    model: model.to_string(),
                    messages: vec![
                        ChatMessage {
                            role: "system",
                            content: system_prompt(input),
                        },
                        ChatMessage {
                            role: "user",
                            content: CHAT_USER_TRIGGER.to_string(),
                        },
                    ],
                    temperature: CHAT_TEMPERATURE,
                    response_format: ResponseFormat {
                        kind: "json_object",
                    },
                },
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct PairsEnvelope {
    pairs: Option<Vec<RawPair>>,
}

#[derive(Debug, Deserialize)]
struct RawPair {
    word: Option<String>,
    emoji: Option<String>,
}

/// Models sometimes wrap JSON in a markdown code fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Extract the generated text from a raw response body.
fn message_text(shape: RequestShape, raw: &str) -> Result<String, SourcingError> {
    let body: Value = serde_json::from_str(raw)?;
    let text = match shape {
        RequestShape::ChatCompletions => body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c0| c0.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str),
        RequestShape::NativeSchema => body
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c0| c0.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p0| p0.get("text"))
            .and_then(Value::as_str),
    };
    text.map(str::to_string)
        .ok_or_else(|| SourcingError::schema("response carries no message text"))
}

/// Parse a raw response body into validated pairs.
pub fn parse_response(shape: RequestShape, raw: &str) -> Result<Vec<Pair>, SourcingError> {
    let text = message_text(shape, raw)?;
    let envelope: PairsEnvelope = serde_json::from_str(strip_code_fence(&text))?;
    let raw_pairs = envelope
        .pairs
        .ok_or_else(|| SourcingError::schema("missing `pairs`"))?;
    if raw_pairs.is_empty() {
        return Err(SourcingError::EmptyResult);
    }

    raw_pairs
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let word = p.word.as_deref().map(str::trim).unwrap_or_default();
            let emoji = p.emoji.as_deref().map(str::trim).unwrap_or_default();
            if word.is_empty() || emoji.is_empty() {
                return Err(SourcingError::schema(format!(
                    "pair {i} is missing `word` or `emoji`"
                )));
            }
            Ok(Pair::new(word, emoji))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcing::provider::{default_provider_configs, ProviderKind};

    fn input() -> PromptInput<'static> {
        PromptInput {
            topic: "ocean",
            count: 6,
            language: Language::Zh,
        }
    }

    fn chat_config() -> ProviderConfig {
        let mut c = default_provider_configs()[2].clone();
        c.api_key = "sk-test".into();
        c
    }

    fn chat_body(content: &str) -> String {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
            .to_string()
    }

    #[test]
    fn chat_request_carries_prompt_contract() {
        let req = build_request(&chat_config(), &input(), &RequestDefaults::default()).unwrap();
        let GenerationRequest::ChatCompletions {
            endpoint,
            api_key,
            body,
        } = req
        else {
            panic!("expected chat request");
        };
        assert_eq!(endpoint, "https://api.openai.com/v1/chat/completions");
        assert_eq!(api_key.as_deref(), Some("sk-test"));
        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.temperature, CHAT_TEMPERATURE);
        assert_eq!(body.messages[1].content, CHAT_USER_TRIGGER);
        let system = &body.messages[0].content;
        assert!(system.contains("exactly 6 pairs"));
        assert!(system.contains("\"ocean\""));
        assert!(system.contains("Chinese (Simplified)"));

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["response_format"]["type"], "json_object");
    }

    #[test]
    fn native_request_uses_schema_and_default_model() {
        let mut config = default_provider_configs()[0].clone();
        config.model_name = " ".into();
        let defaults = RequestDefaults {
            api_key: Some("g-key".into()),
            base_url: None,
        };
        let req = build_request(&config, &input(), &defaults).unwrap();
        assert_eq!(req.shape(), RequestShape::NativeSchema);
        assert_eq!(
            req.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        let GenerationRequest::NativeSchema { api_key, body, .. } = req else {
            panic!("expected native request");
        };
        assert_eq!(api_key, "g-key");
        assert_eq!(
            body.contents[0].parts[0].text,
            "Topic: ocean. Count: 6. Lang: zh. Return JSON pairs of word and emoji."
        );
        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            wire["generationConfig"]["responseSchema"]["properties"]["pairs"]["type"],
            "ARRAY"
        );
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let config = default_provider_configs()[0].clone();
        let err = build_request(&config, &input(), &RequestDefaults::default()).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn keyless_kinds_build_without_credential() {
        let mut config = default_provider_configs()[3].clone();
        config.api_key.clear();
        let req = build_request(&config, &input(), &RequestDefaults::default()).unwrap();
        assert_eq!(req.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn other_kind_without_endpoint_is_a_configuration_error() {
        let config = ProviderConfig {
            provider: ProviderKind::Other,
            base_url: None,
            ..chat_config()
        };
        let err = build_request(&config, &input(), &RequestDefaults::default()).unwrap_err();
        assert_eq!(err.kind(), "configuration");

        let defaults = RequestDefaults {
            api_key: None,
            base_url: Some("http://gateway:8080/v1/".into()),
        };
        let req = build_request(&config, &input(), &defaults).unwrap();
        assert_eq!(req.endpoint(), "http://gateway:8080/v1/chat/completions");
    }

    #[test]
    fn parses_chat_pairs_and_trims() {
        let raw = chat_body(r#"{"pairs":[{"word":" Whale ","emoji":"🐋"},{"word":"Crab","emoji":"🦀"}]}"#);
        let pairs = parse_response(RequestShape::ChatCompletions, &raw).unwrap();
        assert_eq!(pairs, vec![Pair::new("Whale", "🐋"), Pair::new("Crab", "🦀")]);
    }

    #[test]
    fn parses_fenced_content() {
        let raw = chat_body("```json\n{\"pairs\":[{\"word\":\"Sun\",\"emoji\":\"☀\"}]}\n```");
        let pairs = parse_response(RequestShape::ChatCompletions, &raw).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn parses_native_candidates() {
        let raw = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"pairs\":[{\"word\":\"Moon\",\"emoji\":\"🌙\"}]}" }] } }]
        })
        .to_string();
        let pairs = parse_response(RequestShape::NativeSchema, &raw).unwrap();
        assert_eq!(pairs, vec![Pair::new("Moon", "🌙")]);
    }

    #[test]
    fn classifies_bad_responses() {
        let not_json = parse_response(RequestShape::ChatCompletions, "<html>").unwrap_err();
        assert_eq!(not_json.kind(), "schema");

        let no_pairs = parse_response(RequestShape::ChatCompletions, &chat_body(r#"{"items":[]}"#))
            .unwrap_err();
        assert_eq!(no_pairs.kind(), "schema");

        let empty = parse_response(RequestShape::ChatCompletions, &chat_body(r#"{"pairs":[]}"#))
            .unwrap_err();
        assert_eq!(empty, SourcingError::EmptyResult);

        let partial = parse_response(
            RequestShape::ChatCompletions,
            &chat_body(r#"{"pairs":[{"word":"Fish"}]}"#),
        )
        .unwrap_err();
        assert_eq!(partial.kind(), "schema");

        let no_choices = parse_response(RequestShape::ChatCompletions, "{}").unwrap_err();
        assert_eq!(no_choices.kind(), "schema");
    }
}
