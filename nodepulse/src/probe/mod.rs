//! Node latency probing.
//!
//! [`NodeProber`] measures one node: a TCP handshake for tunnel protocols, or
//! an HTTP request routed through the node for forward proxies.
//! [`BatchScheduler`] runs any [`Prober`] over a node list in bounded windows
//! and writes each result back onto its node.

mod error;
mod gauge;
mod http;
mod prober;
mod result;
mod scheduler;
mod tcp;

pub use error::ProbeError;
pub use gauge::{InFlightGauge, InFlightGuard};
pub use http::HttpProxyProbe;
pub use prober::{NodeProber, Prober};
pub use result::ProbeResult;
pub use scheduler::{cap_nodes, BatchScheduler};
pub use tcp::TcpProbe;
