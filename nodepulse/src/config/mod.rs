//! Configuration for NodePulse.
//!
//! Two layers, each with one concern:
//!
//! - [`ConfigFile`]: the user's INI file (`~/.nodepulse/config.ini`)
//! - [`PipelineConfig`] / [`FetchConfig`]: typed values handed to the stages
//!
//! ```
//! use nodepulse::config::{ConfigFile, PipelineConfig};
//!
//! let file = ConfigFile::default();
//! let pipeline: PipelineConfig = file.pipeline_config();
//! assert_eq!(pipeline.window_size(), 100);
//! ```

mod defaults;
mod fetch;
mod file;
mod parser;
mod pipeline;
mod settings;

pub use defaults::*;
pub use fetch::FetchConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use pipeline::PipelineConfig;
pub use settings::{
    ConfigFile, LoggingSettings, OutputSettings, ProbeSettings, SelectSettings, SourcesSettings,
};
