//! In-flight probe accounting.
//!
//! The batch scheduler bounds concurrency structurally (one window at a
//! time); this gauge makes the bound observable. Every probe task holds an
//! [`InFlightGuard`] for its whole lifetime, so `peak()` is the maximum number
//! of probes that were ever running together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct InFlightGauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one probe as in flight until the returned guard is dropped.
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.update_peak(current);
        InFlightGuard {
            gauge: Arc::clone(self),
        }
    }

    fn update_peak(&self, current: usize) {
        let mut peak = self.peak.load(Ordering::SeqCst);
        while current > peak {
            match self
                .peak
                .compare_exchange_weak(peak, current, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest concurrent count observed since creation.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Decrements the gauge on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    gauge: Arc<InFlightGauge>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_release() {
        let gauge = Arc::new(InFlightGauge::new());
        assert_eq!(gauge.in_flight(), 0);

        {
            let _a = gauge.enter();
            assert_eq!(gauge.in_flight(), 1);
            {
                let _b = gauge.enter();
                assert_eq!(gauge.in_flight(), 2);
            }
            assert_eq!(gauge.in_flight(), 1);
        }

        assert_eq!(gauge.in_flight(), 0);
        assert_eq!(gauge.peak(), 2);
    }

    #[tokio::test]
    async fn test_peak_across_tasks() {
        let gauge = Arc::new(InFlightGauge::new());
        let barrier = Arc::new(tokio::sync::Barrier::new(5));
        let mut handles = Vec::new();

        for _ in 0..5 {
            let gauge = Arc::clone(&gauge);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                let _guard = gauge.enter();
                barrier.wait().await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(gauge.peak(), 5);
        assert_eq!(gauge.in_flight(), 0);
    }
}
