//! Metric report types.

use serde::{Deserialize, Serialize};

/// Aggregate request metrics, as reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Requests handled since process start
    pub request_count: u64,

    /// Requests that ended in an error response
    pub error_count: u64,

    /// `error_count / request_count`, 0.0 when nothing was handled yet
    pub error_rate: f64,

    /// Mean handler latency in milliseconds
    pub avg_latency_ms: f64,
}
