//! Thread-safe metrics engine — running totals behind an `RwLock`.

use crate::model::MetricsSnapshot;
use std::sync::RwLock;

/// Collects per-request samples and serves aggregate reports.
///
/// Thread-safe via `RwLock`; the lock is held only for the few arithmetic
/// operations below.
pub struct MetricsEngine {
    totals: RwLock<RunningTotals>,
}

/// Internal running totals.
#[derive(Debug, Default)]
struct RunningTotals {
    /// Requests handled.
    request_count: u64,
    /// Requests that produced an error response.
    error_count: u64,
    /// Sum of handler latencies, in milliseconds.
    total_latency_ms: f64,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEngine {
    /// Create an engine with zeroed totals.
    pub fn new() -> Self {
        Self {
            totals: RwLock::new(RunningTotals::default()),
        }
    }

    /// Record one handled request.
    pub fn record(&self, latency_ms: f64, is_error: bool) {
        let mut totals = self.totals.write().unwrap_or_else(|e| e.into_inner());
        totals.request_count += 1;
        totals.total_latency_ms += latency_ms;
        if is_error {
            totals.error_count += 1;
        }
    }

    /// Current aggregates.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let totals = self.totals.read().unwrap_or_else(|e| e.into_inner());
        let requests = totals.request_count;
        let (error_rate, avg_latency_ms) = if requests == 0 {
            (0.0, 0.0)
        } else {
            (
                totals.error_count as f64 / requests as f64,
                totals.total_latency_ms / requests as f64,
            )
        };
        MetricsSnapshot {
            request_count: requests,
            error_count: totals.error_count,
            error_rate,
            avg_latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_engine_reports_zeroes() {
        let engine = MetricsEngine::new();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.request_count, 0);
        assert_eq!(snapshot.error_rate, 0.0);
        assert_eq!(snapshot.avg_latency_ms, 0.0);
    }

    #[test]
    fn aggregates_latency_and_errors() {
        let engine = MetricsEngine::new();
        engine.record(10.0, false);
        engine.record(30.0, true);
        engine.record(20.0, false);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.request_count, 3);
        assert_eq!(snapshot.error_count, 1);
        assert!((snapshot.error_rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((snapshot.avg_latency_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn record_is_safe_across_threads() {
        let engine = std::sync::Arc::new(MetricsEngine::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        engine.record(1.0, false);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(engine.snapshot().request_count, 400);
    }
}
