use crate::{
    obs::sink::{MetricsEvent, record},
    record::FieldValues,
    sequence::SortableSequence,
    value::Value,
    view::{Cursor, IndexedView},
};
use std::{cmp::Ordering, ops::Bound};

impl<R, S> IndexedView<R, S>
where
    R: FieldValues,
    S: SortableSequence<R>,
{
    /// Records whose keys fall in `begin..=end`.
    ///
    /// Open ends round inward: a missing `begin` starts at the next record
    /// above it, a missing `end` finishes at the next record below it.
    /// Empty when `begin > end` or nothing lies between them.
    pub fn get_range(&mut self, begin: &Value, end: &Value) -> &[R] {
        self.range(Bound::Included(begin), Bound::Included(end))
    }

    /// Records whose keys fall between two arbitrary bounds.
    ///
    /// A bound that matches a run of equal keys includes or excludes the
    /// whole run.
    pub fn range(&mut self, lower: Bound<&Value>, upper: Bound<&Value>) -> &[R] {
        let span = self.range_positions(lower, upper);
        let rows: &[R] = span
            .and_then(|(start, finish)| self.records.as_slice().get(start..=finish))
            .unwrap_or(&[]);

        record(MetricsEvent::Range {
            rows: rows.len() as u64,
        });

        rows
    }

    /// Inclusive index span selected by two bounds, if non-empty.
    ///
    /// Positions a search engine reports outside the slice select nothing.
    pub fn range_positions(
        &mut self,
        lower: Bound<&Value>,
        upper: Bound<&Value>,
    ) -> Option<(usize, usize)> {
        let len = self.records.len();
        if len == 0 || self.bounds_inverted(lower, upper) {
            return None;
        }

        let start = match lower {
            Bound::Unbounded => Some(0),
            Bound::Included(value) => match self.bounded_fetch(value) {
                Cursor::Exact(_) => Some(self.run_start(value)),
                cursor => cursor.next_high(),
            },
            Bound::Excluded(value) => match self.bounded_fetch(value) {
                Cursor::Exact(_) => Some(self.run_end(value)).filter(|next| *next < len),
                cursor => cursor.next_high(),
            },
        };

        let finish = match upper {
            Bound::Unbounded => Some(len - 1),
            Bound::Included(value) => match self.bounded_fetch(value) {
                Cursor::Exact(_) => self.run_end(value).checked_sub(1),
                cursor => cursor.next_low(),
            },
            Bound::Excluded(value) => match self.bounded_fetch(value) {
                Cursor::Exact(_) => self.run_start(value).checked_sub(1),
                cursor => cursor.next_low(),
            },
        };

        let (Some(start), Some(finish)) = (start, finish) else {
            return None;
        };

        (start <= finish && finish < len).then_some((start, finish))
    }

    // Fetch, discarding any position the engine reported outside the slice.
    fn bounded_fetch(&mut self, value: &Value) -> Cursor {
        let len = self.records.len();
        let cursor = self.fetch(value).cursor;
        let in_slice = |index: Option<usize>| index.is_none_or(|i| i < len);

        match cursor {
            Cursor::Exact(index) if index < len => cursor,
            Cursor::Gap { low, high } if in_slice(low) && in_slice(high) => cursor,
            Cursor::Exact(_) | Cursor::Gap { .. } | Cursor::Empty => Cursor::Empty,
        }
    }

    // First index whose key is not below `value`.
    fn run_start(&self, value: &Value) -> usize {
        let key_field = &self.key_field;
        let comparator = &self.comparator;
        self.records
            .as_slice()
            .partition_point(|r| comparator.compare(&key_field.read(r), value) == Ordering::Less)
    }

    // First index whose key is above `value`.
    fn run_end(&self, value: &Value) -> usize {
        let key_field = &self.key_field;
        let comparator = &self.comparator;
        self.records
            .as_slice()
            .partition_point(|r| comparator.compare(&key_field.read(r), value) != Ordering::Greater)
    }

    // True when the bounds cannot enclose anything under the comparator.
    fn bounds_inverted(&self, lower: Bound<&Value>, upper: Bound<&Value>) -> bool {
        let (lo, hi, exclusive) = match (lower, upper) {
            (Bound::Included(lo), Bound::Included(hi)) => (lo, hi, false),
            (
                Bound::Included(lo) | Bound::Excluded(lo),
                Bound::Included(hi) | Bound::Excluded(hi),
            ) => (lo, hi, true),
            _ => return false,
        };

        match self.comparator.compare(lo, hi) {
            Ordering::Greater => true,
            Ordering::Equal => exclusive,
            Ordering::Less => false,
        }
    }
}
