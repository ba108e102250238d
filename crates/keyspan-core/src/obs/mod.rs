//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Views and search engines never touch counters directly; every
//! instrumentation point emits a `MetricsEvent` through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
