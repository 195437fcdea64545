//! Protocol-conditional latency prober.

use std::future::Future;
use std::sync::Arc;

use super::error::ProbeError;
use super::http::HttpProxyProbe;
use super::result::ProbeResult;
use super::tcp::TcpProbe;
use crate::config::PipelineConfig;
use crate::log::Logger;
use crate::node::ParsedNode;
use crate::{log_debug, log_warn};

/// Anything that can turn a node into a [`ProbeResult`].
///
/// The scheduler is generic over this trait so tests can substitute
/// deterministic probers for real network I/O.
pub trait Prober: Send + Sync + 'static {
    /// Probe one node. Must resolve within the configured timeout.
    fn probe(&self, node: &ParsedNode) -> impl Future<Output = ProbeResult> + Send;
}

/// Production prober.
///
/// Forward-proxy nodes (`http`, `https`, `socks5`) get an HTTP request
/// routed through them; every other protocol gets a bare TCP connect.
pub struct NodeProber {
    tcp: TcpProbe,
    http: HttpProxyProbe,
    latency_multiplier: f64,
    logger: Arc<dyn Logger>,
}

impl NodeProber {
    pub fn new(config: &PipelineConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            tcp: TcpProbe::new(config.probe_timeout()),
            http: HttpProxyProbe::new(config.probe_timeout(), config.probe_url()),
            latency_multiplier: config.latency_multiplier(),
            logger,
        }
    }
}

impl Prober for NodeProber {
    async fn probe(&self, node: &ParsedNode) -> ProbeResult {
        let identity = &node.identity;
        let measured = if identity.protocol.is_forward_proxy() {
            self.http.measure(identity).await
        } else {
            self.tcp.measure(&identity.host, identity.port).await
        };

        match measured {
            Ok(elapsed) => ProbeResult::from_elapsed(elapsed, self.latency_multiplier),
            Err(ProbeError::UnexpectedStatus(status)) => {
                log_warn!(
                    self.logger,
                    "Unexpected status {} for {}",
                    status,
                    identity.address()
                );
                ProbeResult::Unreachable
            }
            Err(e) => {
                log_debug!(self.logger, "Probe failed for {}: {}", node.key, e);
                ProbeResult::Unreachable
            }
        }
    }
}
