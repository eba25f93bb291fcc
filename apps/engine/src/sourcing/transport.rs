//! Provider transports: the one place the pipeline touches the network.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::sourcing::SourcingError;
use crate::sourcing::request::GenerationRequest;

/// Performs one generation call and returns the raw response body.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn send(&self, request: &GenerationRequest) -> Result<String, SourcingError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, SourcingError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("emoji-link-engine/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProviderTransport for HttpTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, SourcingError> {
        let builder = match request {
            GenerationRequest::ChatCompletions {
                endpoint,
                api_key,
                body,
            } => {
                let builder = self.client.post(endpoint).json(body);
                match api_key {
                    Some(key) => builder.bearer_auth(key),
                    None => builder,
                }
            }
            GenerationRequest::NativeSchema {
                endpoint,
                api_key,
                body,
            } => self
                .client
                .post(endpoint)
                .header("x-goog-api-key", api_key)
                .json(body),
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!(endpoint = request.endpoint(), status = status.as_u16(), "provider responded");
        if !status.is_success() {
            return Err(SourcingError::status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// In-process transport that replays queued responses and records every
/// request it receives. Used for offline runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String, SourcingError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Result<String, SourcingError>) {
        self.responses.lock().push_back(response);
    }

    /// Queue a chat-completions body whose message content is `content`.
    pub fn push_chat_content(&self, content: &str) {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        self.push_response(Ok(body.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, SourcingError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SourcingError::transport("no scripted response")))
    }
}
