//! First-seen-wins deduplication by canonical key.

use std::collections::HashSet;

use super::types::ParsedNode;

/// Keep the first node for every canonical key, preserving input order.
pub fn dedup_nodes(nodes: Vec<ParsedNode>) -> Vec<ParsedNode> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.key.clone()))
        .collect()
}
