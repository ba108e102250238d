//! Metrics sink boundary.
//!
//! Core view/search logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between execution logic
//! and the thread-local metrics state.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Fetch,
    BoundaryShortCircuit,
    CacheHit,
    CacheMiss,
    CacheStale,
    Search { comparisons: u64 },
    Range { rows: u64 },
    Sort { rows: u64 },
    Mutation,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;
            match event {
                MetricsEvent::Fetch => ops.fetch_calls = ops.fetch_calls.saturating_add(1),
                MetricsEvent::BoundaryShortCircuit => {
                    ops.boundary_short_circuits = ops.boundary_short_circuits.saturating_add(1);
                }
                MetricsEvent::CacheHit => ops.cache_hits = ops.cache_hits.saturating_add(1),
                MetricsEvent::CacheMiss => ops.cache_misses = ops.cache_misses.saturating_add(1),
                MetricsEvent::CacheStale => ops.cache_stale = ops.cache_stale.saturating_add(1),
                MetricsEvent::Search { comparisons } => {
                    ops.searches = ops.searches.saturating_add(1);
                    ops.search_comparisons = ops.search_comparisons.saturating_add(comparisons);
                }
                MetricsEvent::Range { rows } => {
                    ops.range_calls = ops.range_calls.saturating_add(1);
                    ops.rows_returned = ops.rows_returned.saturating_add(rows);
                }
                MetricsEvent::Sort { rows } => {
                    ops.sorts = ops.sorts.saturating_add(1);
                    ops.rows_sorted = ops.rows_sorted.saturating_add(rows);
                }
                MetricsEvent::Mutation => ops.mutations = ops.mutations.saturating_add(1),
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    // Clone out of the cell so a sink may itself record without re-borrowing.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit path, unwinding included.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = previous;
            });
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}
