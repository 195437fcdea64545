//! Proxy node descriptors.
//!
//! Turns raw share links into [`ParsedNode`] records and collapses duplicates.
//!
//! ```
//! use nodepulse::node::{dedup_nodes, parse_descriptor};
//!
//! let a = parse_descriptor("vmess://u@1.2.3.4:443?x").unwrap();
//! let b = parse_descriptor("vmess://other@1.2.3.4:443?y").unwrap();
//! assert_eq!(a.key.as_str(), "vmess://1.2.3.4:443");
//! assert_eq!(dedup_nodes(vec![a, b]).len(), 1);
//! ```

mod dedup;
mod error;
mod parser;
mod protocol;
mod types;

pub use dedup::dedup_nodes;
pub use error::ParseError;
pub use parser::{parse_descriptor, DescriptorParser};
pub use protocol::Protocol;
pub use types::{CanonicalKey, NodeIdentity, ParsedNode, FAILED_LATENCY_MS};
