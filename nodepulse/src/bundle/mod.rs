//! Subscription bundle and quality report assembly.
//!
//! ```
//! use nodepulse::bundle::{decode_bundle, encode_bundle, BundleDecode};
//!
//! let bundle = encode_bundle(&["vmess://u@1.2.3.4:443?x"]);
//! assert_eq!(
//!     decode_bundle(&bundle),
//!     BundleDecode::Decoded("vmess://u@1.2.3.4:443?x".to_string())
//! );
//! ```

mod codec;
mod report;

pub use codec::{decode_bundle, encode_bundle, BundleDecode};
pub use report::{QualityReport, QualityTier, ReportRow};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::node::ParsedNode;
use crate::select::select_nodes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("no nodes with a positive latency to bundle")]
    EmptySelection,
}

/// The two output artifacts for one ranked set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Nodes that went into the bundle, fastest first
    pub nodes: Vec<ParsedNode>,
    /// Base64 subscription text
    pub bundle: String,
    pub report: QualityReport,
}

/// Build the bundle and report from a ranked set.
///
/// The input is re-ranked and cut to `top_k` first, so a set read back from
/// disk in any order still yields the fastest nodes. Bundle and report cover
/// exactly the same nodes.
pub fn assemble(
    ranked: Vec<ParsedNode>,
    top_k: usize,
    generated_at: DateTime<Utc>,
) -> Result<Assembly, BundleError> {
    let nodes = select_nodes(ranked, top_k);
    if nodes.is_empty() {
        return Err(BundleError::EmptySelection);
    }

    let raw: Vec<&str> = nodes.iter().map(|n| n.raw.as_str()).collect();
    let bundle = encode_bundle(&raw);
    let report = QualityReport::new(&nodes, generated_at);

    Ok(Assembly {
        nodes,
        bundle,
        report,
    })
}
