use crate::{
    model::KeyField,
    obs::{MetricsEvent, MetricsSink},
    record::Row,
};
use std::cell::RefCell;

/// Records carrying only an `id` key, in the given order.
pub(crate) fn id_rows(ids: &[i64]) -> Vec<Row> {
    ids.iter().map(|id| Row::new().with("id", *id)).collect()
}

/// Records keyed by `name` with a numeric `rank` payload.
pub(crate) fn name_rows(names: &[&str]) -> Vec<Row> {
    names
        .iter()
        .zip(0i64..)
        .map(|(name, rank)| Row::new().with("name", *name).with("rank", rank))
        .collect()
}

pub(crate) fn id_field() -> KeyField {
    KeyField::new("id").expect("id is a valid key field")
}

/// Key ids read back from a slice of `id_rows` records.
pub(crate) fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .map(|row| match row.get("id") {
            Some(crate::value::Value::Int(id)) => *id,
            other => panic!("row has no integer id: {other:?}"),
        })
        .collect()
}

///
/// CapturingSink
/// Metrics sink that keeps every event for assertions.
///

#[derive(Default)]
pub(crate) struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl CapturingSink {
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.borrow().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&MetricsEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}
