use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::LogFormat;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(false)
                .json();
            registry.with(fmt_layer).init();
        }
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).init(),
    }
}
