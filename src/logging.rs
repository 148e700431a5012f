//! Tracing subscriber setup for the demo binary and hosts that want it.
//!
//! `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "datagrid=info";

/// Install a console subscriber. Returns false if one was already installed.
pub fn init_logging() -> bool {
    init_logging_with(DEFAULT_FILTER)
}

pub fn init_logging_with(default_filter: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
