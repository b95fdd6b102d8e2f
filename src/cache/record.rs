//! Cached stat record.

use std::time::{Duration, Instant};
use crate::upstream::PLACEHOLDER_FRAGMENT;

/// Result of the last fetch for one identifier.
///
/// Never mutated: a stale failure is removed and replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    fragment: String,
    /// Set for negative entries.
    error_at: Option<Instant>,
}

impl StatRecord {
    /// Record for a successful fetch.
    pub fn ok(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            error_at: None,
        }
    }

    /// Negative record carrying the placeholder fragment.
    pub fn failed(at: Instant) -> Self {
        Self {
            fragment: PLACEHOLDER_FRAGMENT.to_string(),
            error_at: Some(at),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_error(&self) -> bool {
        self.error_at.is_some()
    }

    pub fn error_at(&self) -> Option<Instant> {
        self.error_at
    }

    /// A negative record whose retry window has opened.
    pub fn is_stale(&self, now: Instant, error_ttl: Duration) -> bool {
        match self.error_at {
            Some(at) => now.saturating_duration_since(at) >= error_ttl,
            None => false,
        }
    }
}
