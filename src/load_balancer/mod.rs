//! Upstream selection subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound fetch
//!     → pool.rs (fixed list of numbered proxy endpoints)
//!     → LoadBalancer picks one:
//!         - random.rs (uniform, seedable)
//!     → endpoint.rs (base URL for the request)
//! ```
//!
//! # Design Decisions
//! - Selection is stateless and may repeat
//! - No per-endpoint health; the circuit breaker handles failures globally

pub mod endpoint;
pub mod pool;
pub mod random;

pub use endpoint::Endpoint;
pub use pool::ProxyPool;
pub use random::RandomSelector;

/// Strategy for choosing an endpoint out of a pool.
pub trait LoadBalancer: Send + Sync + std::fmt::Debug {
    /// Pick one endpoint, `None` only when the slice is empty.
    fn next_endpoint<'a>(&self, endpoints: &'a [Endpoint]) -> Option<&'a Endpoint>;
}
