//! Probe scheduling and selection configuration.

use std::time::Duration;

use super::defaults::{
    DEFAULT_LATENCY_MULTIPLIER, DEFAULT_MAX_NODES, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_PROBE_URL,
    DEFAULT_TOP_K, DEFAULT_WINDOW_SIZE,
};

/// Knobs shared by the prober, batch scheduler and selector.
///
/// Passed explicitly into each stage rather than read from global state.
///
/// # Example
///
/// ```
/// use nodepulse::config::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.probe_timeout(), Duration::from_secs(10));
/// assert_eq!(config.window_size(), 100);
/// assert_eq!(config.max_nodes(), 2000);
/// assert_eq!(config.top_k(), 100);
///
/// let config = PipelineConfig::new()
///     .with_window_size(25)
///     .with_top_k(10);
/// assert_eq!(config.window_size(), 25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Upper bound on a single probe
    probe_timeout: Duration,
    /// Probes launched together; also the peak in-flight count
    window_size: usize,
    /// Only the first `max_nodes` nodes are probed
    max_nodes: usize,
    /// Nodes kept after ranking
    top_k: usize,
    /// Factor applied to measured elapsed milliseconds
    latency_multiplier: f64,
    /// URL requested through forward-proxy nodes
    probe_url: String,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_probe_timeout_secs(self, secs: u64) -> Self {
        self.with_probe_timeout(Duration::from_secs(secs))
    }

    /// Set the window size. Values below 1 are raised to 1.
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size.max(1);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_latency_multiplier(mut self, multiplier: f64) -> Self {
        self.latency_multiplier = multiplier;
        self
    }

    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = url.into();
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn latency_multiplier(&self) -> f64 {
        self.latency_multiplier
    }

    pub fn probe_url(&self) -> &str {
        &self.probe_url
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            window_size: DEFAULT_WINDOW_SIZE,
            max_nodes: DEFAULT_MAX_NODES,
            top_k: DEFAULT_TOP_K,
            latency_multiplier: DEFAULT_LATENCY_MULTIPLIER,
            probe_url: DEFAULT_PROBE_URL.to_string(),
        }
    }
}
