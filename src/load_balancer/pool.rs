//! Proxy pool management.
//!
//! # Responsibilities
//! - Expand the configured host template into numbered endpoints
//! - Apply the load balancing strategy on every outbound call

use crate::config::UpstreamConfig;
use crate::load_balancer::{LoadBalancer, endpoint::Endpoint};

/// Fixed pool of upstream proxies plus the strategy choosing among them.
#[derive(Debug)]
pub struct ProxyPool {
    endpoints: Vec<Endpoint>,
    balancer: Box<dyn LoadBalancer>,
}

impl ProxyPool {
    /// Build the pool `host_template` with `{n}` = 1..=pool_size.
    pub fn from_config(config: &UpstreamConfig, balancer: Box<dyn LoadBalancer>) -> Self {
        let mut endpoints = Vec::with_capacity(config.pool_size as usize);
        for n in 1..=config.pool_size {
            let host = config.host_template.replace("{n}", &n.to_string());
            match Endpoint::new(host.clone()) {
                Ok(endpoint) => endpoints.push(endpoint),
                Err(e) => tracing::warn!(host = %host, error = %e, "Invalid upstream host"),
            }
        }
        tracing::debug!(size = endpoints.len(), "Proxy pool built");

        Self { endpoints, balancer }
    }

    /// Choose the endpoint for the next call.
    pub fn choose(&self) -> Option<&Endpoint> {
        let endpoint = self.balancer.next_endpoint(&self.endpoints);
        if let Some(endpoint) = endpoint {
            tracing::debug!(host = %endpoint.host, "Selected upstream");
        }
        endpoint
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}
