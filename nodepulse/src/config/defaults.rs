//! Default values for every configuration setting.
//!
//! Holds the `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;

// =============================================================================
// Probing
// =============================================================================

/// Per-probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Maximum number of probes in flight at once (one window).
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Nodes beyond this many (in input order) are never probed.
pub const DEFAULT_MAX_NODES: usize = 2000;

/// Scale applied to measured elapsed milliseconds.
pub const DEFAULT_LATENCY_MULTIPLIER: f64 = 2.0;

/// Endpoint fetched through forward-proxy nodes; answers `204 No Content`.
pub const DEFAULT_PROBE_URL: &str = "http://www.gstatic.com/generate_204";

// =============================================================================
// Selection
// =============================================================================

/// Number of nodes kept after ranking.
pub const DEFAULT_TOP_K: usize = 100;

// =============================================================================
// Sources
// =============================================================================

/// Per-source download timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding whitespace-separated source URLs.
pub const SOURCES_ENV_VAR: &str = "NODEPULSE_SOURCES";

/// Older name for [`SOURCES_ENV_VAR`], read only when the primary is unset
/// or blank.
pub const LEGACY_SOURCES_ENV_VAR: &str = "SOURCE_URLS";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            sources: SourcesSettings {
                urls: Vec::new(),
                timeout: DEFAULT_FETCH_TIMEOUT_SECS,
            },
            probe: ProbeSettings {
                timeout: DEFAULT_PROBE_TIMEOUT_SECS,
                window_size: DEFAULT_WINDOW_SIZE,
                max_nodes: DEFAULT_MAX_NODES,
                latency_multiplier: DEFAULT_LATENCY_MULTIPLIER,
                url: DEFAULT_PROBE_URL.to_string(),
            },
            select: SelectSettings {
                top_k: DEFAULT_TOP_K,
            },
            output: OutputSettings {
                directory: PathBuf::from("."),
            },
            logging: LoggingSettings {
                file: config_dir.join("logs").join("nodepulse.log"),
            },
        }
    }
}
