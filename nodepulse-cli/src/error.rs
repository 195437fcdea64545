//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use nodepulse::config::{ConfigFileError, LEGACY_SOURCES_ENV_VAR, SOURCES_ENV_VAR};
use nodepulse::fetch::FetchError;
use nodepulse::pipeline::PipelineError;
use nodepulse::storage::StorageError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Source download failed
    Fetch(FetchError),
    /// A pipeline stage reported a run-level failure
    Pipeline(PipelineError),
    /// Reading or writing an artifact failed
    Storage(StorageError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Fetch(FetchError::NoSources)
            | CliError::Pipeline(PipelineError::Fetch(FetchError::NoSources)) => {
                eprintln!();
                eprintln!("Configure at least one subscription source:");
                eprintln!("  1. Set urls under [sources] in the config file, or");
                eprintln!(
                    "  2. Export {}=\"<url> <url> ...\" ({} is also read)",
                    SOURCES_ENV_VAR, LEGACY_SOURCES_ENV_VAR
                );
            }
            CliError::Fetch(FetchError::NoDescriptors)
            | CliError::Pipeline(PipelineError::Fetch(FetchError::NoDescriptors)) => {
                eprintln!();
                eprintln!("Sources answered but held no share links; previous artifacts were kept.");
            }
            CliError::Storage(StorageError::Missing(_)) => {
                eprintln!();
                eprintln!("Run the previous stage first, or use 'nodepulse run'.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch sources: {}", e),
            CliError::Pipeline(e) => write!(f, "Pipeline failed: {}", e),
            CliError::Storage(e) => write!(f, "Artifact error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            CliError::Storage(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Storage(e)
    }
}
