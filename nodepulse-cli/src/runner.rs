//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, the async runtime and
//! artifact access so command handlers stay small.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{error, info};

use nodepulse::config::ConfigFile;
use nodepulse::log::{Logger, TracingLogger};
use nodepulse::logging::{init_logging_full, LoggingGuard};
use nodepulse::node::ParsedNode;
use nodepulse::storage::{ArtifactStore, NodeSet};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    runtime: Runtime,
    store: ArtifactStore,
    logger: Arc<dyn Logger>,
}

impl CliRunner {
    /// Load config (from `config_path` or the default location), apply
    /// environment overrides, and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; `None` uses `~/.nodepulse/config.ini`
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        }
        .with_env_overrides();

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging_full(&log_dir, &log_file, true, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        let store = ArtifactStore::new(config.output.directory.clone());

        Ok(Self {
            logging_guard,
            config,
            runtime,
            store,
            logger: Arc::new(TracingLogger::new()),
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Library logger that forwards into `tracing`.
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    /// Drive a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("NodePulse v{}", nodepulse::VERSION);
        info!("NodePulse CLI: {} command", command);
        info!("Output directory: {}", self.store.directory().display());
    }

    /// Read a node set artifact. Failures are logged; they end the command.
    pub fn read_nodes(&self, set: NodeSet) -> Result<Vec<ParsedNode>, CliError> {
        self.block_on(self.store.read_nodes(set)).map_err(|e| {
            error!("{}", e);
            CliError::Storage(e)
        })
    }

    pub fn write_nodes(&self, set: NodeSet, nodes: &[ParsedNode]) -> Result<(), CliError> {
        self.block_on(self.store.write_nodes(set, nodes))?;
        info!(
            "Wrote {} nodes to {}",
            nodes.len(),
            self.store.path(set.file_name()).display()
        );
        Ok(())
    }
}

/// Split the configured log path into the directory and file name expected by
/// the logging initializer.
fn split_log_path(path: &Path) -> (String, String) {
    let log_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string());
    let log_file = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "nodepulse.log".to_string());
    (log_dir, log_file)
}
