//! HTTP client for the hub's REST API.

use std::time::Duration;

use tracing::{debug, trace};

use crate::decode::{DecodePass, decode};
use crate::error::{FetchError, Result};
use crate::model::{Downstream, Resource, ServiceFlows, State, Upstream};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client bound to a single hub address.
///
/// No retries, caching or backoff: every call issues exactly one GET.
#[derive(Debug, Clone)]
pub struct Hub6Client {
    address: String,
    http: reqwest::Client,
}

impl Hub6Client {
    /// Create a client for `address` (`host` or `host:port`).
    ///
    /// `timeout` bounds each whole request/response cycle.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Result<Self> {
        let address = address.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Request {
                url: format!("http://{}", address),
                source,
            })?;

        Ok(Self { address, http })
    }

    /// The hub address this client talks to.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Full URL for a resource path.
    pub fn url_for(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    /// Fetch and decode one resource.
    pub async fn fetch<R: Resource>(&self) -> Result<R> {
        let url = self.url_for(R::PATH);

        let request = self
            .http
            .get(&url)
            .build()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        trace!(url = %url, "Sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let decoded = decode::<R>(&body).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;

        if decoded.pass == DecodePass::Lenient {
            debug!(
                resource = R::NAME,
                unknown_fields = ?decoded.unknown_fields,
                "Strict decode failed, accepted lenient decode"
            );
        }

        Ok(decoded.value)
    }

    /// `GET /rest/v1/cablemodem/downstream`
    pub async fn downstream(&self) -> Result<Downstream> {
        self.fetch().await
    }

    /// `GET /rest/v1/cablemodem/upstream`
    pub async fn upstream(&self) -> Result<Upstream> {
        self.fetch().await
    }

    /// `GET /rest/v1/cablemodem/serviceflows`
    pub async fn service_flows(&self) -> Result<ServiceFlows> {
        self.fetch().await
    }

    /// `GET /rest/v1/cablemodem/state_`
    pub async fn state(&self) -> Result<State> {
        self.fetch().await
    }
}
