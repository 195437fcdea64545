//! Bare TCP connect probe.

use std::time::{Duration, Instant};
use tokio::net::TcpStream;

use super::error::ProbeError;

/// Measures how long a TCP handshake to `(host, port)` takes.
///
/// Used for every protocol that is not driven through an HTTP proxy client.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Connect, measure, close.
    ///
    /// Name resolution counts against the timeout. The socket is closed before
    /// this returns, whatever the outcome.
    pub async fn measure(&self, host: &str, port: u16) -> Result<Duration, ProbeError> {
        let start = Instant::now();
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|e| ProbeError::Connect(e.to_string()))?;
        let elapsed = start.elapsed();
        drop(stream);
        Ok(elapsed)
    }
}
