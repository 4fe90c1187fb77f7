//! Request metrics for InboxPilot.
//!
//! The gateway records one sample per handled request; the health endpoint
//! reports the aggregates. All instrumentation lives at the boundary — the
//! core pipeline is never measured from the inside.

pub mod engine;
pub mod model;

pub use engine::MetricsEngine;
pub use model::MetricsSnapshot;
