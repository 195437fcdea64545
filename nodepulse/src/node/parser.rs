//! Descriptor parser: raw line → [`ParsedNode`].

use std::sync::Arc;

use super::error::ParseError;
use super::protocol::Protocol;
use super::types::{NodeIdentity, ParsedNode};
use crate::log::Logger;
use crate::{log_info, log_warn};

/// Maximum number of characters of a rejected line echoed into the log.
const REJECTED_PREVIEW_CHARS: usize = 100;

/// Parse a single descriptor.
///
/// The scheme prefix selects the protocol; the protocol's own grammar then
/// extracts host and port. Surrounding whitespace is ignored but the stored
/// raw text is the trimmed line.
pub fn parse_descriptor(line: &str) -> Result<ParsedNode, ParseError> {
    let line = line.trim();
    let (scheme, body) = line.split_once("://").ok_or(ParseError::MissingScheme)?;
    let protocol: Protocol = scheme.parse()?;
    let (host, port) = protocol.parse_body(body)?;

    Ok(ParsedNode::new(NodeIdentity::new(protocol, host, port), line))
}

/// Parser for batches of raw descriptor lines.
pub struct DescriptorParser {
    logger: Arc<dyn Logger>,
}

impl DescriptorParser {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Parse one line, logging a warning if it is rejected.
    pub fn parse(&self, line: &str) -> Option<ParsedNode> {
        match parse_descriptor(line) {
            Ok(node) => Some(node),
            Err(e) => {
                log_warn!(
                    self.logger,
                    "Unrecognized node format ({}): {}",
                    e,
                    preview(line.trim())
                );
                None
            }
        }
    }

    /// Parse every non-empty line, keeping input order.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<ParsedNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rejected = 0usize;
        let nodes: Vec<ParsedNode> = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let parsed = self.parse(line);
                if parsed.is_none() {
                    rejected += 1;
                }
                parsed
            })
            .collect();

        log_info!(
            self.logger,
            "Parsed {} descriptors ({} rejected)",
            nodes.len(),
            rejected
        );
        nodes
    }
}

fn preview(line: &str) -> String {
    let mut chars = line.chars();
    let head: String = chars.by_ref().take(REJECTED_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
