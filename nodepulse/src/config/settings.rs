//! Settings structs for all configuration sections.
//!
//! Each struct mirrors one `[section]` of the INI file. Pure data, no parsing.

use std::path::PathBuf;

/// Complete configuration loaded from `config.ini`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub sources: SourcesSettings,
    pub probe: ProbeSettings,
    pub select: SelectSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// `[sources]`
#[derive(Debug, Clone)]
pub struct SourcesSettings {
    /// Subscription URLs to download raw descriptors from
    pub urls: Vec<String>,
    /// Per-source HTTP timeout in seconds
    pub timeout: u64,
}

/// `[probe]`
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Per-probe timeout in seconds
    pub timeout: u64,
    /// Probes launched together in one window
    pub window_size: usize,
    /// Nodes considered for probing, in input order
    pub max_nodes: usize,
    /// Factor applied to measured elapsed time
    pub latency_multiplier: f64,
    /// URL requested through forward-proxy nodes
    pub url: String,
}

/// `[select]`
#[derive(Debug, Clone)]
pub struct SelectSettings {
    /// Nodes kept after ranking
    pub top_k: usize,
}

/// `[output]`
#[derive(Debug, Clone)]
pub struct OutputSettings {
    /// Directory holding stage artifacts, bundle and report
    pub directory: PathBuf,
}

/// `[logging]`
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
