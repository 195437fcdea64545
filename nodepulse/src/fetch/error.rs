//! Source fetch errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no source URLs configured")]
    NoSources,

    #[error("all {0} sources failed")]
    AllSourcesFailed(usize),

    #[error("sources returned no descriptor lines")]
    NoDescriptors,

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),
}
