//! Pair sourcing: catalog lookup for adventure, generation with offline
//! fallback for custom. `source_pairs` never fails.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::cards_types::Pair;
use crate::domain::levels::level_at;
use crate::domain::settings::{GameConfig, GameMode, Language};
use crate::errors::sourcing::SourcingError;
use crate::sourcing::fallback::{fallback_pairs, is_sentinel_topic};
use crate::sourcing::provider::ProviderConfig;
use crate::sourcing::request::{build_request, parse_response, PromptInput, RequestDefaults};
use crate::sourcing::transport::ProviderTransport;

/// Everything needed to source one session's pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub mode: GameMode,
    pub language: Language,
    /// Custom path only.
    pub topic: String,
    /// Custom path only; adventure uses the level's own count.
    pub count: usize,
    /// Adventure path only, 1-based.
    pub level: u32,
}

impl SessionRequest {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            mode: config.mode,
            language: config.language,
            topic: config.topic_or_default(),
            count: usize::from(config.session_pair_count),
            level: config.current_level,
        }
    }
}

/// Where a session's pairs came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum PairOrigin {
    /// Adventure level table.
    Catalog,
    /// Remote generator.
    Generated,
    /// Sentinel topic; no call was made.
    Offline,
    /// Generation failed and the offline list was substituted.
    Fallback { kind: &'static str, reason: String },
}

impl PairOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PairOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedPairs {
    pub pairs: Vec<Pair>,
    pub origin: PairOrigin,
}

pub struct PairPipeline<T: ProviderTransport> {
    transport: Arc<T>,
    defaults: RequestDefaults,
}

impl<T: ProviderTransport> Clone for PairPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            defaults: self.defaults.clone(),
        }
    }
}

impl<T: ProviderTransport> PairPipeline<T> {
    pub fn new(transport: Arc<T>, defaults: RequestDefaults) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Pairs for one session.
    ///
    /// Adventure returns the catalog level's pairs. Custom returns exactly
    /// `count` pairs (capped at the fallback list size when substituting);
    /// every generation failure is logged and replaced by the offline list.
    pub async fn source_pairs(
        &self,
        request: &SessionRequest,
        provider: &ProviderConfig,
    ) -> SourcedPairs {
        match request.mode {
            GameMode::Adventure => {
                let level = level_at(request.level);
                debug!(level = level.level, count = level.pairs_count, "catalog pairs");
                SourcedPairs {
                    pairs: level.pairs(request.language),
                    origin: PairOrigin::Catalog,
                }
            }
            GameMode::Custom => self.source_custom(request, provider).await,
        }
    }

    async fn source_custom(&self, request: &SessionRequest, provider: &ProviderConfig) -> SourcedPairs {
        let topic = match request.topic.trim() {
            "" => request.language.default_topic(),
            t => t,
        };
        if is_sentinel_topic(topic) {
            debug!(topic, count = request.count, "sentinel topic, using offline pairs");
            return SourcedPairs {
                pairs: fallback_pairs(request.count),
                origin: PairOrigin::Offline,
            };
        }

        let input = PromptInput {
            topic,
            count: request.count,
            language: request.language,
        };
        match self.generate(&input, provider).await {
            Ok(mut pairs) => {
                pairs.truncate(request.count);
                info!(
                    provider_id = %provider.id,
                    count = pairs.len(),
                    "generated pairs"
                );
                SourcedPairs {
                    pairs,
                    origin: PairOrigin::Generated,
                }
            }
            Err(err) => {
                warn!(
                    provider_id = %provider.id,
                    kind = err.kind(),
                    error = %err,
                    "falling back to offline pairs"
                );
                SourcedPairs {
                    pairs: fallback_pairs(request.count),
                    origin: PairOrigin::Fallback {
                        kind: err.kind(),
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    async fn generate(
        &self,
        input: &PromptInput<'_>,
        provider: &ProviderConfig,
    ) -> Result<Vec<Pair>, SourcingError> {
        let request = build_request(provider, input, &self.defaults)?;
        let raw = self.transport.send(&request).await?;
        let pairs = parse_response(request.shape(), &raw)?;
        if pairs.is_empty() {
            return Err(SourcingError::EmptyResult);
        }
        Ok(pairs)
    }
}
