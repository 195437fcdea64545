//! Logger handed to each pipeline component.
//!
//! Stages never reach for a process-wide logger. Instead every component that
//! reports per-item outcomes (rejected descriptors, failed probes, skipped
//! sources) receives an `Arc<dyn Logger>` when it is built.
//!
//! - `Logger` trait: the interface components log through
//! - `TracingLogger`: production adapter onto the `tracing` crate
//! - `NoOpLogger`: discards everything
//! - `MemoryLogger`: keeps entries in memory so tests can assert on them
//!
//! ```
//! use nodepulse::log::{Logger, MemoryLogger};
//! use nodepulse::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_warn!(logger, "Unrecognized node format: {}", "not-a-node");
//! assert_eq!(logger.warnings().len(), 1);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogEntry, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
