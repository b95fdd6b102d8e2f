//! Stat cache subsystem.
//!
//! # Data Flow
//! ```text
//! get_or_fetch(id) / get_or_fetch_batch(ids)
//!     → stat_cache.rs lookup (hit | negative | stale | miss)
//!     → misses: CircuitBreaker gate → StatFetcher
//!     → record.rs entry inserted (ok or negative)
//! ```
//!
//! # Design Decisions
//! - Keys are upper-cased identifiers
//! - Successful entries live for the process lifetime
//! - Negative entries are served until their retry window opens, then evicted
//!   right before the retry
//! - Concurrent misses may fetch twice; the last insert wins

pub mod record;
pub mod stat_cache;

pub use record::StatRecord;
pub use stat_cache::{normalize_id, StatCache};
