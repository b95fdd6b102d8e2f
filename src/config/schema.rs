//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every section
//! is `#[serde(default)]`, so an empty file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the stat server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct StatServerConfig {
    /// Core settings resolved once at startup.
    pub settings: Settings,

    /// Upstream proxy pool and fetch protocol.
    pub upstream: UpstreamConfig,

    /// Stat cache tuning.
    pub cache: CacheConfig,

    /// Circuit breaker tuning.
    pub breaker: BreakerConfig,

    /// Host adapter listener.
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Core settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Upstream request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Log verbosity (0 = warn, 1 = info, 2 = debug, 3+ = trace).
    pub log_level: u8,

    /// Mount (drive) identifier the host exposes the data under.
    pub mount_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            log_level: 1,
            mount_id: "n".to_string(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Which upstream protocol revision to speak.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One request per identifier, reply used verbatim.
    Single,
    /// One request per group of identifiers, positional CSV reply.
    #[default]
    Batch,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Single => "single",
            FetchMode::Batch => "batch",
        }
    }
}

/// Upstream pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Host name pattern; `{n}` is replaced by the endpoint number.
    pub host_template: String,

    /// Number of endpoints in the pool (numbered from 1).
    pub pool_size: u32,

    /// Protocol revision used for lookups.
    pub fetch_mode: FetchMode,

    /// Dedicated host for batch requests. Falls back to the pool when unset.
    pub batch_endpoint: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host_template: "stat-proxy-{n}.wot.bkon.ru".to_string(),
            pool_size: 9,
            fetch_mode: FetchMode::default(),
            batch_endpoint: None,
        }
    }
}

/// Stat cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a failed lookup is served from the negative cache before retry.
    pub error_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { error_ttl_secs: 300 }
    }
}

impl CacheConfig {
    pub fn error_ttl(&self) -> Duration {
        Duration::from_secs(self.error_ttl_secs)
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BreakerConfig {
    /// Seconds the circuit stays open before a trial is allowed.
    pub cooldown_secs: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self { cooldown_secs: 300 }
    }
}

impl BreakerConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Listener configuration for the HTTP host adapter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Per-request deadline for host reads in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
