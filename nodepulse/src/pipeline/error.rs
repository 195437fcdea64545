//! Run-level pipeline failures.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::storage::StorageError;

/// Conditions that stop a pipeline run.
///
/// Per-descriptor and per-probe problems never surface here; they are
/// logged and absorbed by their stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no descriptors to parse")]
    NoDescriptors,

    #[error("no parsed nodes to work with")]
    NoParsedNodes,

    #[error("no node passed the latency probe")]
    NoSurvivors,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
