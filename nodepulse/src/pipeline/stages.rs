//! Individual pipeline stages.
//!
//! Each stage takes the previous stage's typed output and returns its own.
//! Stages never touch the filesystem; persistence is the caller's concern.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::PipelineError;
use crate::bundle::{assemble, Assembly, BundleError};
use crate::config::PipelineConfig;
use crate::log::Logger;
use crate::node::{dedup_nodes, DescriptorParser, ParsedNode};
use crate::probe::{BatchScheduler, Prober};
use crate::select::select_nodes;
use crate::{log_error, log_info};

/// Parse raw lines and collapse duplicates.
pub fn parse_stage(
    lines: &[String],
    logger: Arc<dyn Logger>,
) -> Result<Vec<ParsedNode>, PipelineError> {
    if lines.iter().all(|l| l.trim().is_empty()) {
        log_error!(logger, "No descriptors to parse");
        return Err(PipelineError::NoDescriptors);
    }

    let parser = DescriptorParser::new(Arc::clone(&logger));
    let parsed = parser.parse_lines(lines.iter().map(String::as_str));
    let parsed_count = parsed.len();
    let nodes = dedup_nodes(parsed);
    if nodes.is_empty() {
        log_error!(logger, "None of {} descriptors could be parsed", lines.len());
        return Err(PipelineError::NoParsedNodes);
    }

    log_info!(
        logger,
        "Kept {} unique nodes ({} duplicates removed)",
        nodes.len(),
        parsed_count - nodes.len()
    );
    Ok(nodes)
}

/// Probe every node (after capping) and record its latency.
///
/// An empty node set fails with [`PipelineError::NoParsedNodes`].
pub async fn probe_stage<P: Prober>(
    nodes: Vec<ParsedNode>,
    prober: Arc<P>,
    config: &PipelineConfig,
    logger: Arc<dyn Logger>,
) -> Result<Vec<ParsedNode>, PipelineError> {
    if nodes.is_empty() {
        log_error!(logger, "No nodes to test");
        return Err(PipelineError::NoParsedNodes);
    }
    Ok(BatchScheduler::with_shared(prober, config.clone(), logger)
        .probe_all(nodes)
        .await)
}

/// Rank probed nodes and keep the fastest `top_k`.
pub fn select_stage(
    nodes: Vec<ParsedNode>,
    top_k: usize,
    logger: Arc<dyn Logger>,
) -> Result<Vec<ParsedNode>, PipelineError> {
    let probed = nodes.len();
    let selected = select_nodes(nodes, top_k);
    if selected.is_empty() {
        log_error!(logger, "No valid nodes after probing {} nodes", probed);
        return Err(PipelineError::NoSurvivors);
    }

    log_info!(logger, "Selected {} of {} nodes", selected.len(), probed);
    Ok(selected)
}

/// Build the subscription bundle and quality report.
pub fn generate_stage(
    selected: Vec<ParsedNode>,
    top_k: usize,
    generated_at: DateTime<Utc>,
    logger: Arc<dyn Logger>,
) -> Result<Assembly, PipelineError> {
    match assemble(selected, top_k, generated_at) {
        Ok(assembly) => {
            log_info!(
                logger,
                "Generated subscription with {} nodes",
                assembly.nodes.len()
            );
            Ok(assembly)
        }
        Err(BundleError::EmptySelection) => {
            log_error!(logger, "No valid nodes available for subscription");
            Err(PipelineError::NoSurvivors)
        }
    }
}
