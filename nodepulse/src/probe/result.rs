//! Outcome of one probe.

use std::time::Duration;

use crate::node::FAILED_LATENCY_MS;

/// Result of probing a single node.
///
/// A success always carries a strictly positive latency; anything else is
/// folded into `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeResult {
    Reachable { latency_ms: f64 },
    Unreachable,
}

impl ProbeResult {
    /// Build a result from a measured elapsed time.
    ///
    /// The reported latency is `elapsed_ms * multiplier`. A non-positive or
    /// non-finite product is reported as unreachable.
    pub fn from_elapsed(elapsed: Duration, multiplier: f64) -> Self {
        let latency_ms = elapsed.as_secs_f64() * 1000.0 * multiplier;
        if latency_ms.is_finite() && latency_ms > 0.0 {
            ProbeResult::Reachable { latency_ms }
        } else {
            ProbeResult::Unreachable
        }
    }

    /// Latency in milliseconds, or `-1` for failures.
    pub fn latency_ms(&self) -> f64 {
        match self {
            ProbeResult::Reachable { latency_ms } => *latency_ms,
            ProbeResult::Unreachable => FAILED_LATENCY_MS,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeResult::Reachable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_elapsed_applies_multiplier() {
        let result = ProbeResult::from_elapsed(Duration::from_millis(60), 2.0);
        assert!(result.is_reachable());
        assert!((result.latency_ms() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_not_a_success() {
        let result = ProbeResult::from_elapsed(Duration::ZERO, 2.0);
        assert_eq!(result, ProbeResult::Unreachable);
        assert_eq!(result.latency_ms(), -1.0);
    }

    #[test]
    fn test_unreachable_sentinel() {
        assert!(!ProbeResult::Unreachable.is_reachable());
        assert_eq!(ProbeResult::Unreachable.latency_ms(), FAILED_LATENCY_MS);
    }
}
