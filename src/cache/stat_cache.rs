//! Per-player stat cache with negative caching.
//!
//! # Responsibilities
//! - Serve cached fragments without I/O
//! - Serve the placeholder for recent failures without retrying
//! - Gate every outbound fetch on the circuit breaker
//! - Group misses of a multi-player lookup into one batch call

use dashmap::DashMap;
use std::collections::HashMap;
use std::time::Duration;
use crate::cache::record::StatRecord;
use crate::clock::SharedClock;
use crate::config::{FetchMode, StatServerConfig};
use crate::observability::metrics;
use crate::resilience::CircuitBreaker;
use crate::upstream::{FetchError, StatFetcher, PLACEHOLDER_FRAGMENT};

/// Cache key for a player identifier.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

enum Lookup {
    Cached(String),
    Miss,
}

/// Thread-safe stat cache in front of a [`StatFetcher`].
#[derive(Debug)]
pub struct StatCache<F> {
    entries: DashMap<String, StatRecord>,
    fetcher: F,
    breaker: CircuitBreaker,
    clock: SharedClock,
    mode: FetchMode,
    error_ttl: Duration,
}

impl<F: StatFetcher> StatCache<F> {
    pub fn new(
        fetcher: F,
        mode: FetchMode,
        error_ttl: Duration,
        breaker: CircuitBreaker,
        clock: SharedClock,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            fetcher,
            breaker,
            clock,
            mode,
            error_ttl,
        }
    }

    /// Cache wired up from configuration, with its own breaker.
    pub fn from_config(fetcher: F, config: &StatServerConfig, clock: SharedClock) -> Self {
        let breaker = CircuitBreaker::new(config.breaker.cooldown(), clock.clone());
        Self::new(
            fetcher,
            config.upstream.fetch_mode,
            config.cache.error_ttl(),
            breaker,
            clock,
        )
    }

    /// Fragment for one player, fetching on a miss.
    ///
    /// `None` means nothing is cached and the circuit is open.
    pub async fn get_or_fetch(&self, id: &str) -> Option<String> {
        let key = normalize_id(id);
        if key.is_empty() {
            return None;
        }
        match self.lookup(&key) {
            Lookup::Cached(fragment) => Some(fragment),
            Lookup::Miss => self.fetch_single(&key).await,
        }
    }

    /// Fragments for several players, in input order.
    ///
    /// Players with nothing to serve (circuit open, not cached) are omitted.
    pub async fn get_or_fetch_batch(&self, ids: &[String]) -> Vec<String> {
        let keys: Vec<String> = ids
            .iter()
            .map(|id| normalize_id(id))
            .filter(|key| !key.is_empty())
            .collect();

        let mut resolved: HashMap<String, String> = HashMap::with_capacity(keys.len());
        let mut missing: Vec<String> = Vec::new();
        for key in &keys {
            if resolved.contains_key(key) || missing.contains(key) {
                continue;
            }
            match self.lookup(key) {
                Lookup::Cached(fragment) => {
                    resolved.insert(key.clone(), fragment);
                }
                Lookup::Miss => missing.push(key.clone()),
            }
        }

        if !missing.is_empty() {
            match self.mode {
                FetchMode::Batch => resolved.extend(self.fetch_many(&missing).await),
                FetchMode::Single => {
                    for key in missing {
                        if let Some(fragment) = self.fetch_single(&key).await {
                            resolved.insert(key, fragment);
                        }
                    }
                }
            }
        }

        keys.iter().filter_map(|key| resolved.get(key).cloned()).collect()
    }

    fn lookup(&self, key: &str) -> Lookup {
        let now = self.clock.now();
        let stale = match self.entries.get(key) {
            Some(record) if !record.is_error() => {
                metrics::record_cache_lookup("hit");
                return Lookup::Cached(record.fragment().to_string());
            }
            Some(record) if !record.is_stale(now, self.error_ttl) => {
                metrics::record_cache_lookup("negative");
                return Lookup::Cached(record.fragment().to_string());
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            let ttl = self.error_ttl;
            if self
                .entries
                .remove_if(key, |_, record| record.is_stale(now, ttl))
                .is_some()
            {
                tracing::debug!(id = %key, "Evicted stale negative entry");
            }
        }
        metrics::record_cache_lookup("miss");
        Lookup::Miss
    }

    async fn fetch_single(&self, key: &str) -> Option<String> {
        if !self.breaker.is_available() {
            tracing::debug!(id = %key, "Circuit open, skipping fetch");
            return None;
        }

        let result = match self.mode {
            FetchMode::Single => self.fetcher.fetch_one(key).await,
            FetchMode::Batch => {
                let batch = [key.to_string()];
                self.fetcher
                    .fetch_batch(&batch)
                    .await
                    .and_then(|fragments| {
                        fragments
                            .into_iter()
                            .next()
                            .ok_or_else(|| FetchError::Protocol("empty batch reply".to_string()))
                    })
            }
        };

        let fragment = match result {
            Ok(fragment) => {
                self.entries.insert(key.to_string(), StatRecord::ok(fragment.clone()));
                self.breaker.record_success();
                fragment
            }
            Err(e) => {
                tracing::warn!(id = %key, error = %e, "Stat fetch failed");
                self.entries
                    .insert(key.to_string(), StatRecord::failed(self.clock.now()));
                self.breaker.record_failure();
                PLACEHOLDER_FRAGMENT.to_string()
            }
        };
        Some(fragment)
    }

    async fn fetch_many(&self, keys: &[String]) -> Vec<(String, String)> {
        if !self.breaker.is_available() {
            tracing::debug!(count = keys.len(), "Circuit open, skipping batch fetch");
            return Vec::new();
        }

        let result = self.fetcher.fetch_batch(keys).await.and_then(|fragments| {
            if fragments.len() == keys.len() {
                Ok(fragments)
            } else {
                Err(FetchError::Protocol(format!(
                    "expected {} fragments, got {}",
                    keys.len(),
                    fragments.len()
                )))
            }
        });

        match result {
            Ok(fragments) => {
                let pairs: Vec<(String, String)> = keys.iter().cloned().zip(fragments).collect();
                for (key, fragment) in &pairs {
                    self.entries.insert(key.clone(), StatRecord::ok(fragment.clone()));
                }
                self.breaker.record_success();
                tracing::debug!(count = pairs.len(), "Batch stat fetch succeeded");
                pairs
            }
            Err(e) => {
                tracing::warn!(count = keys.len(), error = %e, "Batch stat fetch failed");
                let now = self.clock.now();
                for key in keys {
                    self.entries.insert(key.clone(), StatRecord::failed(now));
                }
                self.breaker.record_failure();
                keys.iter()
                    .map(|key| (key.clone(), PLACEHOLDER_FRAGMENT.to_string()))
                    .collect()
            }
        }
    }

    /// Cached record for a player, without side effects.
    pub fn record(&self, id: &str) -> Option<StatRecord> {
        self.entries.get(&normalize_id(id)).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}
