//! Pair sourcing: provider configs, request shaping, transports and the
//! pipeline that ties them together with the offline fallback.

pub mod fallback;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod request;
pub mod transport;

pub use pipeline::{PairOrigin, PairPipeline, SessionRequest, SourcedPairs};
pub use provider::{default_provider_configs, ProviderConfig, ProviderKind};
pub use transport::{HttpTransport, ProviderTransport, ScriptedTransport};
