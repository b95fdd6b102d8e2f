//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StatServerConfig (validated, immutable)
//!     → handed to each subsystem at startup
//!
//! Missing, malformed or invalid file:
//!     → loader.rs substitutes StatServerConfig::default()
//!     → error reported once logging is initialized
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    BreakerConfig, CacheConfig, FetchMode, ListenerConfig, ObservabilityConfig, Settings,
    StatServerConfig, UpstreamConfig,
};
