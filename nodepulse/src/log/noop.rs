//! Silent logger.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// A logger that discards all messages.
///
/// Handy when driving a stage from a benchmark or a test that does not care
/// about per-item diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
