//! HTTP client abstraction for testability.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::FetchError;

const DEFAULT_USER_AGENT: &str = concat!("nodepulse/", env!("CARGO_PKG_VERSION"));

/// Asynchronous HTTP GET.
///
/// Source fetching is written against this trait so tests can serve bodies
/// from memory.
pub trait AsyncHttpClient: Send + Sync + 'static {
    /// Fetch `url` and return the response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// [`AsyncHttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP GET request starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                url = url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "HTTP request failed"
            );
            FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        debug!(url = url, status = status.as_u16(), "HTTP response received");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: format!("failed to read body: {}", e),
        })?;
        trace!(url = url, bytes = bytes.len(), "HTTP response body read");
        Ok(bytes.to_vec())
    }
}
