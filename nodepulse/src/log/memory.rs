//! In-memory logger.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;
use std::sync::Mutex;

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every message it receives.
///
/// Used to assert that a stage reported what it dropped, e.g. that an
/// unrecognized descriptor produced exactly one warning.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries in arrival order.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages captured at warning level.
    pub fn warnings(&self) -> Vec<String> {
        self.at_level(LogLevel::Warn)
    }

    /// Messages captured at error level.
    pub fn errors(&self) -> Vec<String> {
        self.at_level(LogLevel::Error)
    }

    fn at_level(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let entry = LogEntry {
            level,
            message: args.to_string(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
