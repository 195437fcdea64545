//! Windowed concurrent probing.
//!
//! Nodes are probed in consecutive windows of at most `window_size` nodes.
//! All probes of a window run concurrently; the next window starts only after
//! every probe of the current one has resolved. Results are written back by
//! index, so output order always matches input order.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use super::gauge::InFlightGauge;
use super::prober::Prober;
use super::result::ProbeResult;
use crate::config::PipelineConfig;
use crate::log::Logger;
use crate::node::ParsedNode;
use crate::{log_debug, log_info, log_warn};

/// Extra time granted on top of the probe timeout before a task is abandoned.
const PROBE_GRACE: Duration = Duration::from_secs(1);

/// Keep at most the first `max_nodes` nodes, in their original order.
pub fn cap_nodes(mut nodes: Vec<ParsedNode>, max_nodes: usize) -> Vec<ParsedNode> {
    nodes.truncate(max_nodes);
    nodes
}

/// Runs a [`Prober`] over a node list in bounded windows.
pub struct BatchScheduler<P: Prober> {
    prober: Arc<P>,
    config: PipelineConfig,
    logger: Arc<dyn Logger>,
    gauge: Arc<InFlightGauge>,
}

impl<P: Prober> BatchScheduler<P> {
    pub fn new(prober: P, config: PipelineConfig, logger: Arc<dyn Logger>) -> Self {
        Self::with_shared(Arc::new(prober), config, logger)
    }

    /// Build a scheduler around a prober that is also used elsewhere.
    pub fn with_shared(prober: Arc<P>, config: PipelineConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            prober,
            config,
            logger,
            gauge: Arc::new(InFlightGauge::new()),
        }
    }

    /// Concurrency gauge shared with every probe task.
    pub fn gauge(&self) -> &Arc<InFlightGauge> {
        &self.gauge
    }

    /// Probe every node and return them with latency recorded.
    ///
    /// The input is first capped to `max_nodes`. A probe that panics or
    /// overruns its deadline is recorded as unreachable; it never aborts the
    /// run.
    pub async fn probe_all(&self, nodes: Vec<ParsedNode>) -> Vec<ParsedNode> {
        let total = nodes.len();
        let mut nodes = cap_nodes(nodes, self.config.max_nodes());
        if nodes.len() < total {
            log_info!(
                self.logger,
                "Capped probe set from {} to {} nodes",
                total,
                nodes.len()
            );
        }

        let window_size = self.config.window_size();
        let deadline = self.config.probe_timeout() + PROBE_GRACE;
        let window_count = nodes.len().div_ceil(window_size);
        let mut results: Vec<Option<ProbeResult>> = vec![None; nodes.len()];

        for (window_index, start) in (0..nodes.len()).step_by(window_size).enumerate() {
            let end = (start + window_size).min(nodes.len());
            log_debug!(
                self.logger,
                "Probing window {}/{} ({} nodes)",
                window_index + 1,
                window_count,
                end - start
            );

            let mut tasks = JoinSet::new();
            for (index, node) in nodes.iter().enumerate().take(end).skip(start) {
                let prober = Arc::clone(&self.prober);
                let gauge = Arc::clone(&self.gauge);
                let node = node.clone();
                tasks.spawn(async move {
                    let _guard = gauge.enter();
                    let result = tokio::time::timeout(deadline, prober.probe(&node))
                        .await
                        .unwrap_or(ProbeResult::Unreachable);
                    (index, result)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, result)) => results[index] = Some(result),
                    Err(e) => log_warn!(self.logger, "Probe task failed: {}", e),
                }
            }
        }

        let mut reachable = 0usize;
        for (node, result) in nodes.iter_mut().zip(results) {
            let result = result.unwrap_or(ProbeResult::Unreachable);
            if result.is_reachable() {
                reachable += 1;
                node.record_latency(Some(result.latency_ms()));
            } else {
                node.record_latency(None);
            }
        }

        log_info!(
            self.logger,
            "Probed {} nodes in {} windows: {} reachable, {} failed (peak concurrency {})",
            nodes.len(),
            window_count,
            reachable,
            nodes.len() - reachable,
            self.gauge.peak()
        );

        nodes
    }
}
