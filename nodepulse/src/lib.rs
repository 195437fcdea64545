//! NodePulse - proxy node latency ranking
//!
//! This library turns subscription sources full of proxy share links into a
//! small, ranked subscription: descriptors are parsed and deduplicated, every
//! node is probed for latency under a bounded concurrency window, and the
//! fastest nodes are bundled into a base64 subscription plus a Markdown
//! quality report.
//!
//! # High-Level API
//!
//! The [`pipeline`] module chains the stages:
//!
//! ```ignore
//! use nodepulse::config::PipelineConfig;
//! use nodepulse::log::TracingLogger;
//! use nodepulse::pipeline::PipelineRunner;
//! use nodepulse::probe::NodeProber;
//! use nodepulse::storage::ArtifactStore;
//!
//! let config = PipelineConfig::default();
//! let logger = Arc::new(TracingLogger::new());
//! let prober = NodeProber::new(&config, logger.clone());
//! let runner = PipelineRunner::new(prober, config, ArtifactStore::new("."), logger);
//! let summary = runner.run(raw_lines).await?;
//! ```

pub mod bundle;
pub mod config;
pub mod fetch;
pub mod log;
pub mod logging;
pub mod node;
pub mod pipeline;
pub mod probe;
pub mod select;
pub mod storage;

/// Version of the NodePulse library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
