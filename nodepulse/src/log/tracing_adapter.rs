//! Adapter from the `Logger` trait onto `tracing`.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger that forwards every message to the `tracing` macros.
///
/// This is what the CLI hands to the pipeline once
/// [`init_logging_full`](crate::logging::init_logging_full) has installed a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!("{}", args),
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}
