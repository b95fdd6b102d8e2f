//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Lookup that misses the cache:
//!     → circuit_breaker.rs is_available() (skip the fetch when open)
//!     → upstream fetch with a bounded timeout
//!     → record_success() / record_failure()
//! ```
//!
//! # Design Decisions
//! - One breaker per server context, shared by every endpoint in the pool
//! - No retries: a failed fetch is answered from the negative cache
//! - Cooldowns are evaluated lazily, no background task

pub mod circuit_breaker;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
