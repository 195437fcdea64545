//! Tracing subscriber setup for NodePulse binaries.
//!
//! - Writes to `<log_dir>/<log_file>` (truncated at session start)
//! - Optionally mirrors to stdout
//! - Filter comes from `RUST_LOG`, defaulting to `info` (or `debug` when asked)

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file, created if missing
/// * `log_file` - Log file name inside `log_dir`
/// * `stdout_enabled` - Also print events to stdout
/// * `debug_mode` - Force `debug` level regardless of `RUST_LOG`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// truncated.
pub fn init_logging_full(
    log_dir: &str,
    log_file: &str,
    stdout_enabled: bool,
    debug_mode: bool,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(Path::new(log_dir), log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .with_target(false)
            .compact()
    });

    let env_filter = if debug_mode {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the log directory and truncate the log file.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<(), io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")
}
