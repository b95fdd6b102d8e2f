//! Circuit breaker for upstream protection.
//!
//! # States
//! - Closed: lookups may reach the upstream
//! - Open: upstream assumed down, fetches are skipped and the cache serves
//!   whatever it holds
//!
//! # State Transitions
//! ```text
//! Closed → Closed (strike):  first failure since close
//! Closed → Open:             second failure with no success in between
//! Open   → Closed (trial):   cooldown elapsed, observed by is_available()
//! trial  → Open:             the trial fails
//! trial  → Closed:           the trial succeeds
//! ```
//!
//! There is no timer. Closing happens the next time somebody asks.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use crate::clock::SharedClock;
use crate::observability::metrics;

/// Externally visible breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
}

#[derive(Debug, Default)]
struct BreakerInner {
    /// One failure already seen since the last close or success.
    saw_one_failure: bool,
    /// Set while open.
    opened_at: Option<Instant>,
}

/// Two-strike circuit breaker with a lazily evaluated cooldown.
#[derive(Debug)]
pub struct CircuitBreaker {
    cooldown: Duration,
    clock: SharedClock,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration, clock: SharedClock) -> Self {
        Self {
            cooldown,
            clock,
            inner: Mutex::new(BreakerInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether an outbound fetch may be attempted now.
    ///
    /// Closes the circuit if the cooldown has run out. The call that closes it
    /// gets the trial: one more failure re-opens immediately.
    pub fn is_available(&self) -> bool {
        let mut inner = self.lock();
        match inner.opened_at {
            None => true,
            Some(opened_at) if self.clock.elapsed_since(opened_at) >= self.cooldown => {
                inner.opened_at = None;
                inner.saw_one_failure = true;
                tracing::info!("Upstream cooldown elapsed, circuit closed for trial");
                metrics::record_breaker_transition("closed");
                true
            }
            Some(_) => false,
        }
    }

    /// Report a failed upstream call.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        if inner.opened_at.is_some() {
            // Late result from a call started before the circuit opened.
            return;
        }

        if inner.saw_one_failure {
            let now = self.clock.now();
            inner.opened_at = Some(now);
            inner.saw_one_failure = false;
            tracing::warn!(
                cooldown_secs = self.cooldown.as_secs(),
                "Upstream unavailable, circuit opened"
            );
            metrics::record_breaker_transition("open");
        } else {
            inner.saw_one_failure = true;
            tracing::warn!("First upstream failure");
        }
    }

    /// Report a clean round trip. Forgives a pending strike, never closes.
    pub fn record_success(&self) {
        self.lock().saw_one_failure = false;
    }

    /// Current state without evaluating the cooldown.
    pub fn state(&self) -> BreakerState {
        if self.lock().opened_at.is_some() {
            BreakerState::Open
        } else {
            BreakerState::Closed
        }
    }
}
