//! Probe failure reasons.

use std::time::Duration;
use thiserror::Error;

/// Why a single probe did not produce a latency.
///
/// Probe failures are per-node: the node is recorded as unreachable and the
/// rest of the window carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to build proxy client: {0}")]
    ClientBuild(String),
}
