//! Stage wiring.
//!
//! The stages are plain functions over typed node sets ([`stages`]); the
//! [`PipelineRunner`] chains them in memory and persists the artifacts only
//! once the whole chain has succeeded.

mod error;
mod runner;
pub mod stages;

pub use error::PipelineError;
pub use runner::{PipelineRunner, RunOutput, RunSummary};
pub use stages::{generate_stage, parse_stage, probe_stage, select_stage};
