//! End-to-end pipeline run.

use std::sync::Arc;

use chrono::Utc;

use super::error::PipelineError;
use super::stages::{generate_stage, parse_stage, probe_stage, select_stage};
use crate::bundle::Assembly;
use crate::config::PipelineConfig;
use crate::log::Logger;
use crate::node::ParsedNode;
use crate::probe::Prober;
use crate::storage::{ArtifactBatch, ArtifactStore, NodeSet};
use crate::{log_debug, log_info};

/// Counts reported at the end of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub descriptors: usize,
    pub unique_nodes: usize,
    pub probed: usize,
    pub reachable: usize,
    pub selected: usize,
}

/// Every intermediate and final result of one run, held in memory until the
/// run has succeeded.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub raw_lines: Vec<String>,
    pub processed: Vec<ParsedNode>,
    pub tested: Vec<ParsedNode>,
    pub assembly: Assembly,
}

impl RunOutput {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            descriptors: self.raw_lines.len(),
            unique_nodes: self.processed.len(),
            probed: self.tested.len(),
            reachable: self.tested.iter().filter(|n| n.reachable).count(),
            selected: self.assembly.nodes.len(),
        }
    }
}

/// Drives parse → probe → select → generate over one descriptor list.
pub struct PipelineRunner<P: Prober> {
    prober: Arc<P>,
    config: PipelineConfig,
    store: ArtifactStore,
    logger: Arc<dyn Logger>,
}

impl<P: Prober> PipelineRunner<P> {
    pub fn new(
        prober: P,
        config: PipelineConfig,
        store: ArtifactStore,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            prober: Arc::new(prober),
            config,
            store,
            logger,
        }
    }

    /// Run every stage in memory, without touching the artifact store.
    pub async fn execute(&self, raw_lines: Vec<String>) -> Result<RunOutput, PipelineError> {
        let processed = parse_stage(&raw_lines, Arc::clone(&self.logger))?;
        let tested = probe_stage(
            processed.clone(),
            Arc::clone(&self.prober),
            &self.config,
            Arc::clone(&self.logger),
        )
        .await?;
        let selected = select_stage(
            tested.clone(),
            self.config.top_k(),
            Arc::clone(&self.logger),
        )?;
        let assembly = generate_stage(
            selected,
            self.config.top_k(),
            Utc::now(),
            Arc::clone(&self.logger),
        )?;

        Ok(RunOutput {
            raw_lines,
            processed,
            tested,
            assembly,
        })
    }

    /// Run every stage, then persist all artifacts.
    ///
    /// Nothing is written unless every stage succeeds, and the six artifacts
    /// are committed as one batch, so a failed run leaves the previous
    /// artifacts in place.
    pub async fn run(&self, raw_lines: Vec<String>) -> Result<RunSummary, PipelineError> {
        let output = self.execute(raw_lines).await?;
        persist(&self.store, &output, self.logger.as_ref()).await?;

        let summary = output.summary();
        log_info!(
            self.logger,
            "Run complete: {} descriptors, {} unique, {} reachable, {} selected",
            summary.descriptors,
            summary.unique_nodes,
            summary.reachable,
            summary.selected
        );
        Ok(summary)
    }
}

async fn persist(
    store: &ArtifactStore,
    output: &RunOutput,
    logger: &dyn Logger,
) -> Result<(), PipelineError> {
    let batch = ArtifactBatch::new()
        .raw_lines(&output.raw_lines)
        .nodes(NodeSet::Processed, &output.processed)?
        .nodes(NodeSet::Tested, &output.tested)?
        .nodes(NodeSet::Filtered, &output.assembly.nodes)?
        .bundle(&output.assembly.bundle)
        .report(&output.assembly.report.to_markdown());
    store.commit(batch).await?;
    log_debug!(logger, "Artifacts written to {}", store.directory().display());
    Ok(())
}
