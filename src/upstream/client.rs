//! HTTP stat fetcher.
//!
//! # Responsibilities
//! - Pick an endpoint per call from the proxy pool
//! - Issue single (`/<ID>.xml`) or batch (`/<ID>,<ID>,...`) GET requests
//! - Bound every call by the configured timeout
//!
//! A timeout is reported like any other transport failure.

use std::time::Duration;
use url::Url;
use crate::config::UpstreamConfig;
use crate::load_balancer::{Endpoint, LoadBalancer, ProxyPool};
use crate::observability::metrics;
use crate::upstream::codec::decode_batch;
use crate::upstream::types::FetchError;
use crate::upstream::StatFetcher;

/// Fetcher talking to the stat proxies over HTTP.
#[derive(Debug)]
pub struct RemoteFetcher {
    client: reqwest::Client,
    pool: ProxyPool,
    batch_endpoint: Option<Endpoint>,
}

impl RemoteFetcher {
    /// Create a fetcher for the configured pool.
    pub fn new(
        config: &UpstreamConfig,
        timeout: Duration,
        balancer: Box<dyn LoadBalancer>,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        let batch_endpoint = match &config.batch_endpoint {
            Some(host) => Some(Endpoint::new(host.clone()).map_err(|e| {
                FetchError::Transport(format!("invalid batch endpoint {}: {}", host, e))
            })?),
            None => None,
        };

        Ok(Self {
            client,
            pool: ProxyPool::from_config(config, balancer),
            batch_endpoint,
        })
    }

    fn pick(&self) -> Result<&Endpoint, FetchError> {
        self.pool
            .choose()
            .ok_or_else(|| FetchError::Transport("no upstream endpoints configured".to_string()))
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        tracing::debug!(url = %url, "Upstream request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!(url = %url, status = %status, "Upstream response");

        if !status.is_success() {
            return Err(FetchError::Transport(format!("upstream returned {}", status)));
        }
        Ok(response.text().await?)
    }
}

impl StatFetcher for RemoteFetcher {
    async fn fetch_one(&self, id: &str) -> Result<String, FetchError> {
        let url = self.pick()?.url_for(&format!("{}.xml", id.to_uppercase()));
        let result = self.get_text(url).await.and_then(|body| {
            if body.trim().is_empty() {
                Err(FetchError::Protocol("empty reply".to_string()))
            } else {
                Ok(body)
            }
        });

        metrics::record_upstream_request("single", outcome_label(&result));
        result
    }

    async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<String>, FetchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = match &self.batch_endpoint {
            Some(endpoint) => endpoint,
            None => self.pick()?,
        };
        let url = endpoint.url_for(&ids.join(","));
        let result = self
            .get_text(url)
            .await
            .and_then(|body| decode_batch(ids, &body));

        metrics::record_upstream_request("batch", outcome_label(&result));
        result
    }
}

fn outcome_label<T>(result: &Result<T, FetchError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    }
}
