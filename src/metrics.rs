//! Vendor-agnostic metrics collection via a pluggable sink.
//!
//! This module provides a trait-based sink pattern that allows consumers to
//! observe navigation evaluations and table reloads without tying the library
//! to a specific metrics backend (Prometheus, OpenTelemetry, CloudWatch, ...).
//!
//! **Note:** only available when the `observability` feature is enabled.
//!
//! ## Usage
//!
//! Implement [`MetricsSink`] and register it once at startup:
//!
//! ```ignore
//! use routegate_core::metrics::{EvaluationStats, MetricsSink, ReloadStats};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! struct Denials(AtomicU64);
//!
//! impl MetricsSink for Denials {
//!     fn on_evaluation(&self, stats: &EvaluationStats) {
//!         if !stats.allowed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! routegate_core::metrics::set_sink(Arc::new(Denials(AtomicU64::new(0))));
//! ```

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

/// Snapshot of one navigation evaluation, passed to [`MetricsSink::on_evaluation`].
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStats {
    /// Wall-clock time for resolution plus evaluation.
    pub duration: Duration,
    /// Whether the decision was an allow.
    pub allowed: bool,
    /// The path that was navigated to.
    pub path: String,
    /// The winning pattern, if any matched.
    pub matched_pattern: Option<String>,
}

/// Snapshot of a route table reload, passed to [`MetricsSink::on_reload`].
#[derive(Debug, Clone, Serialize)]
pub struct ReloadStats {
    /// Time when the reload completed.
    pub reload_time: std::time::SystemTime,
}

/// Trait for consuming evaluation and reload events.
///
/// Implementations are called on the navigation hot path and must be
/// thread-safe and non-blocking.
pub trait MetricsSink: Send + Sync {
    fn on_evaluation(&self, stats: &EvaluationStats);

    fn on_reload(&self, stats: &ReloadStats) {
        let _ = stats;
    }
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

/// Install the global metrics sink. Only the first call takes effect.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(event = "Metrics", "metrics sink already installed, ignoring");
    }
}

pub(crate) fn sink() -> Option<&'static Arc<dyn MetricsSink>> {
    SINK.get()
}
