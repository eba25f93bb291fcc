#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use engine::domain::cards_types::Pair;
use engine::sourcing::provider::{default_provider_configs, ProviderConfig};
use engine::sourcing::request::RequestDefaults;
use engine::sourcing::{PairPipeline, ScriptedTransport};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

/// Pipeline over a fresh scripted transport; the transport is returned for
/// queueing responses and inspecting calls.
pub fn scripted_pipeline() -> (PairPipeline<ScriptedTransport>, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let pipeline = PairPipeline::new(Arc::clone(&transport), RequestDefaults::default());
    (pipeline, transport)
}

/// A chat-completions provider that needs no ambient credential.
pub fn chat_provider() -> ProviderConfig {
    let mut config = default_provider_configs()
        .into_iter()
        .find(|c| c.id == "gpt-4o")
        .expect("gpt-4o is a default provider");
    config.api_key = "sk-test".into();
    config
}

/// `{"pairs": [...]}` with `n` distinct entries.
pub fn pairs_json(n: usize) -> String {
    let pairs: Vec<Pair> = (0..n)
        .map(|i| Pair::new(format!("Thing {i}"), format!("#{i}")))
        .collect();
    serde_json::json!({ "pairs": pairs }).to_string()
}
