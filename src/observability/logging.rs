//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Map the numeric log verbosity setting onto a filter directive

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a configured verbosity level.
///
/// 0 = warnings only, 1 = info, 2 = debug, anything higher = trace.
pub fn filter_for_level(level: u8) -> &'static str {
    match level {
        0 => "stat_server=warn,tower_http=warn",
        1 => "stat_server=info,tower_http=info",
        2 => "stat_server=debug,tower_http=debug",
        _ => "stat_server=trace,tower_http=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: u8) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(filter_for_level(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
