//! Node identity and per-node pipeline record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::protocol::Protocol;

/// The `(protocol, host, port)` triple that identifies a node.
///
/// Credentials, transport parameters and display names are deliberately not
/// part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
}

impl NodeIdentity {
    pub fn new(protocol: Protocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
        }
    }

    /// Canonical `protocol://host:port` key for this identity.
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey(format!("{}://{}:{}", self.protocol, self.host, self.port))
    }

    /// `host:port` suitable for a socket connect.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Deduplication key, `protocol://host:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latency recorded for failed probes.
pub const FAILED_LATENCY_MS: f64 = -1.0;

/// A parsed descriptor moving through the pipeline.
///
/// `latency_ms` is `None` until the node has been probed. After probing it
/// holds either a positive latency (`reachable == true`) or
/// [`FAILED_LATENCY_MS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedNode {
    #[serde(flatten)]
    pub identity: NodeIdentity,
    pub key: CanonicalKey,
    pub raw: String,
    #[serde(default, rename = "latency")]
    pub latency_ms: Option<f64>,
    #[serde(default, rename = "valid")]
    pub reachable: bool,
}

impl ParsedNode {
    /// A freshly parsed, not yet probed node.
    pub fn new(identity: NodeIdentity, raw: impl Into<String>) -> Self {
        let key = identity.key();
        Self {
            identity,
            key,
            raw: raw.into(),
            latency_ms: None,
            reachable: false,
        }
    }

    /// Record a probe outcome. Non-positive latencies are treated as failures.
    pub fn record_latency(&mut self, latency_ms: Option<f64>) {
        match latency_ms {
            Some(ms) if ms > 0.0 => {
                self.latency_ms = Some(ms);
                self.reachable = true;
            }
            _ => {
                self.latency_ms = Some(FAILED_LATENCY_MS);
                self.reachable = false;
            }
        }
    }

    /// Latency if the node was probed successfully.
    pub fn positive_latency(&self) -> Option<f64> {
        self.latency_ms.filter(|ms| *ms > 0.0)
    }

    pub fn protocol(&self) -> Protocol {
        self.identity.protocol
    }
}
