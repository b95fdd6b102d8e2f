//! Upstream endpoint.

use url::Url;

/// A single upstream stat proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host (optionally with port) as configured.
    pub host: String,
    /// Pre-calculated base URL, always ending in `/`.
    pub base_url: Url,
}

impl Endpoint {
    /// Build an endpoint for a host such as `stat-proxy-3.wot.bkon.ru` or `127.0.0.1:8000`.
    pub fn new(host: impl Into<String>) -> Result<Self, url::ParseError> {
        let host = host.into();
        let base_url = Url::parse(&format!("http://{}/", host))?;
        Ok(Self { host, base_url })
    }

    /// URL of a resource on this endpoint. `resource` becomes a single
    /// percent-encoded path segment.
    pub fn url_for(&self, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
        }
        url
    }
}
