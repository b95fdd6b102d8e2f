//! Metrics collection and exposition.
//!
//! # Metrics
//! - `stat_cache_lookups_total` (counter): lookups by result (hit, negative, miss)
//! - `stat_upstream_requests_total` (counter): outbound calls by mode and outcome
//! - `stat_breaker_transitions_total` (counter): circuit transitions by target state
//! - `stat_commands_total` (counter): consumer commands by name

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cache_lookup(result: &'static str) {
    metrics::counter!("stat_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_upstream_request(mode: &'static str, outcome: &'static str) {
    metrics::counter!("stat_upstream_requests_total", "mode" => mode, "outcome" => outcome)
        .increment(1);
}

pub fn record_breaker_transition(to: &'static str) {
    metrics::counter!("stat_breaker_transitions_total", "to" => to).increment(1);
}

pub fn record_command(command: &'static str) {
    metrics::counter!("stat_commands_total", "command" => command).increment(1);
}
