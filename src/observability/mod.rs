//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters for cache, upstream, breaker, commands)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Log verbosity comes from configuration, RUST_LOG overrides it
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
