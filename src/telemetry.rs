//! Telemetry and observability setup
//!
//! Configures structured logging with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Filter directives used when `RUST_LOG` is not set
pub fn default_directives(level: &str) -> String {
    format!("searchrelay={},tower_http=debug", level)
}

/// Initialize tracing subscriber for structured logging
///
/// This can only be called once per process. Subsequent calls are silently ignored.
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Examples
///
/// ```no_run
/// let config = searchrelay::config::ObservabilityConfig::default();
/// searchrelay::telemetry::init(&config);
/// tracing::info!("Application started");
/// ```
pub fn init(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}
