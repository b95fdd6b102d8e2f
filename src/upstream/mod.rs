//! Upstream stat fetching.
//!
//! # Data Flow
//! ```text
//! Stat cache miss
//!     → StatFetcher::fetch_one / fetch_batch
//!     → client.rs (pick endpoint, GET with timeout)
//!     → codec.rs (batch reply → one fragment per id)
//!     → Ok(fragments) or FetchError (Transport | Protocol)
//! ```
//!
//! # Design Decisions
//! - Fetchers never retry; cache and breaker bookkeeping belong to the caller
//! - Both protocol revisions live behind one trait, configuration picks one

pub mod client;
pub mod codec;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::RemoteFetcher;
pub use codec::PLACEHOLDER_FRAGMENT;
pub use types::FetchError;

use std::future::Future;

/// Remote source of stat fragments.
pub trait StatFetcher: Send + Sync {
    /// Fetch the fragment for one identifier.
    fn fetch_one(&self, id: &str) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Fetch fragments for several identifiers in a single call.
    ///
    /// On success the result has exactly one fragment per id, in order.
    fn fetch_batch(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}
