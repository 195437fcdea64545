//! Logger trait definition.

use std::fmt::Arguments;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Logging interface for pipeline components.
///
/// Implementations must be `Send + Sync` because probes log from spawned
/// tasks.
pub trait Logger: Send + Sync {
    /// Log a message at the specified level.
    ///
    /// The level-specific helpers delegate here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Format-string logging macros over any `Logger`.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemoryLogger;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_helpers_route_to_matching_level() {
        let logger = MemoryLogger::new();
        logger.trace(format_args!("t"));
        logger.debug(format_args!("d"));
        logger.info(format_args!("i"));
        logger.warn(format_args!("w"));
        logger.error(format_args!("e"));

        let levels: Vec<LogLevel> = logger.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Trace,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error
            ]
        );
    }

    #[test]
    fn test_macros_format_arguments() {
        let logger = MemoryLogger::new();
        crate::log_info!(logger, "probed {} of {}", 3, 5);
        assert_eq!(logger.entries()[0].message, "probed 3 of 5");
    }
}
