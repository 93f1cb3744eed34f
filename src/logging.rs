//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured level. Format is
//! `pretty` for development or `json` for production.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` if set, otherwise `menopulse=<level>`
pub fn env_filter(config: &LoggingConfig, extra: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = if extra.is_empty() {
            format!("menopulse={}", config.level)
        } else {
            format!("menopulse={},{}", config.level, extra)
        };
        EnvFilter::new(directives)
    })
}

/// Install the global tracing subscriber
///
/// `extra` adds filter directives for other crates (e.g. `tower_http=debug`).
pub fn init_logging(config: &LoggingConfig, extra: &str) {
    let registry = tracing_subscriber::registry().with(env_filter(config, extra));

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}
