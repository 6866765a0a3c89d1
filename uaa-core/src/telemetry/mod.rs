//! Structured logging initialisation

use crate::config::LogConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given log settings.
///
/// `trace` wins over `debug`; `RUST_LOG` wins over both.
pub fn default_directive(config: &LogConfig) -> &'static str {
    if config.trace {
        "uaa_core=trace"
    } else if config.debug {
        "uaa_core=debug"
    } else {
        "uaa_core=info"
    }
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(config: &LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(config).into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true);
        registry.with(fmt_layer).try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer();
        registry.with(fmt_layer).try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
