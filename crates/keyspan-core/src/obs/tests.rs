use crate::{
    obs::{MetricsEvent, metrics_report, metrics_reset_all, sink::record, with_metrics_sink},
    record::Row,
    test_fixtures::{CapturingSink, id_rows},
    value::Value,
    view::IndexedView,
};
use std::rc::Rc;

// Metrics state is thread-local and each test runs on its own thread, so
// resetting at the top of a test is enough to isolate it.

#[test]
fn global_sink_accumulates_view_activity() {
    metrics_reset_all();

    let mut view = IndexedView::<Row>::new(id_rows(&[1, 3, 5]), "id").expect("view");
    view.fetch(&Value::Int(3)).fetch(&Value::Int(3));
    let _ = view.get_range(&Value::Int(0), &Value::Int(4));
    view.sort();

    let report = metrics_report();
    assert_eq!(report.ops.fetch_calls, 4);
    assert_eq!(report.ops.cache_misses, 2);
    assert_eq!(report.ops.cache_hits, 1);
    assert_eq!(report.ops.boundary_short_circuits, 1);
    assert_eq!(report.ops.searches, 2);
    assert_eq!(report.ops.range_calls, 1);
    assert_eq!(report.ops.rows_returned, 2);
    assert_eq!(report.ops.sorts, 1);
    assert_eq!(report.ops.rows_sorted, 3);
}

#[test]
fn reset_clears_counters() {
    record(MetricsEvent::Mutation);
    metrics_reset_all();

    assert_eq!(metrics_report().ops.mutations, 0);
}

#[test]
fn hit_ratio_needs_lookups() {
    metrics_reset_all();
    assert_eq!(metrics_report().cache_hit_ratio(), None);

    record(MetricsEvent::CacheHit);
    record(MetricsEvent::CacheHit);
    record(MetricsEvent::CacheHit);
    record(MetricsEvent::CacheMiss);

    assert_eq!(metrics_report().cache_hit_ratio(), Some(0.75));
}

#[test]
fn scoped_sink_diverts_and_restores() {
    metrics_reset_all();
    let sink = Rc::new(CapturingSink::default());

    with_metrics_sink(sink.clone(), || record(MetricsEvent::Mutation));
    record(MetricsEvent::Mutation);

    assert_eq!(sink.events(), vec![MetricsEvent::Mutation]);
    assert_eq!(metrics_report().ops.mutations, 1);
}

#[test]
fn report_serializes_to_json() {
    metrics_reset_all();
    record(MetricsEvent::Search { comparisons: 4 });

    let json = serde_json::to_value(metrics_report()).expect("report serializes");
    assert_eq!(json["ops"]["search_comparisons"], 4);
}
