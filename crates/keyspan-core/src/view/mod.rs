//! Module: view
//! Responsibility: own a sorted record sequence and answer point and range
//! queries by key through the search engine and position cache.
//! Does not own: the search algorithm itself (see `search`).
//! Boundary: every layout change goes through this type so the cache
//! generation and boundaries stay in step with the records.

mod cursor;
mod range;


use crate::{
    config::IndexConfig,
    error::IndexError,
    model::KeyField,
    obs::sink::{MetricsEvent, record},
    record::FieldValues,
    search::{BinarySearch, CacheLookup, Generation, PositionCache, SearchEngine, SearchRequest},
    sequence::{SortableSequence, validate_len},
    value::{Comparator, ComparatorKind, Value},
};
use std::{cmp::Ordering, fmt};

// re-exports
pub use cursor::Cursor;

///
/// Boundaries
/// Key values of the first and last records; `None` when empty.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Boundaries {
    min: Option<Value>,
    max: Option<Value>,
}

impl Boundaries {
    fn derive<R: FieldValues>(records: &[R], key_field: &KeyField) -> Self {
        Self {
            min: records.first().map(|r| key_field.read(r)),
            max: records.last().map(|r| key_field.read(r)),
        }
    }
}

///
/// IndexedView
///
/// Sorted sequence of records with cached point lookup and range extraction
/// by one key field.
///
/// Callers are expected to keep the sequence sorted (call [`Self::sort`]
/// after construction if it is not). Every layout change made through the
/// view advances the cache generation, so cached positions never outlive
/// the layout they were computed against.
///

pub struct IndexedView<R, S = Vec<R>> {
    records: S,
    key_field: KeyField,
    comparator: Comparator,
    engine: Box<dyn SearchEngine<R>>,
    cache: PositionCache,
    bounds: Boundaries,
    cursor: Cursor,
}

impl<R, S> IndexedView<R, S>
where
    R: FieldValues,
    S: SortableSequence<R>,
{
    /// Build a view keyed by `key_field`, picking the comparator from the
    /// minimum key (numeric keys order numerically, anything else lexically).
    pub fn new(records: S, key_field: impl Into<String>) -> Result<Self, IndexError> {
        Self::build(records, KeyField::new(key_field)?, ComparatorKind::Auto, true)
    }

    pub fn from_config(records: S, config: &IndexConfig) -> Result<Self, IndexError> {
        Self::build(
            records,
            config.key_field.clone(),
            config.comparator,
            config.memoize,
        )
    }

    fn build(
        mut records: S,
        key_field: KeyField,
        comparator: ComparatorKind,
        memoize: bool,
    ) -> Result<Self, IndexError> {
        validate_len(records.len())?;
        records.settle();

        if let Some(first) = records.as_slice().first() {
            key_field.require(first)?;
        }

        let bounds = Boundaries::derive(records.as_slice(), &key_field);
        let comparator = comparator.resolve(bounds.min.as_ref())?;
        let cache = if memoize {
            PositionCache::new()
        } else {
            PositionCache::disabled()
        };

        Ok(Self {
            records,
            key_field,
            comparator,
            engine: Box::new(BinarySearch),
            cache,
            bounds,
            cursor: Cursor::Empty,
        })
    }

    ///
    /// CONFIGURATION
    ///

    /// Replace the comparator. Does not re-sort; cached positions computed
    /// under the previous ordering are retired.
    pub fn set_comparator(&mut self, comparator: Comparator) -> Result<&mut Self, IndexError> {
        comparator.check_compatible(self.bounds.min.as_ref())?;
        self.comparator = comparator;
        self.cache.advance();

        Ok(self)
    }

    /// Replace the search engine. Cached positions from the previous engine
    /// are retired.
    pub fn set_search_engine(&mut self, engine: impl SearchEngine<R> + 'static) -> &mut Self {
        self.engine = Box::new(engine);
        self.cache.advance();

        self
    }

    ///
    /// LAYOUT
    ///

    /// Stable sort ascending by key under the active comparator.
    pub fn sort(&mut self) -> &mut Self {
        let key_field = &self.key_field;
        let comparator = &self.comparator;
        self.records
            .sort_by(|a, b| comparator.compare(&key_field.read(a), &key_field.read(b)));

        record(MetricsEvent::Sort {
            rows: self.records.len() as u64,
        });
        self.relayout();

        self
    }

    /// Edit the backing sequence in place.
    ///
    /// The closure may reorder, add or drop records freely; the view retires
    /// cached positions and re-derives boundaries afterwards. Sorting is the
    /// caller's responsibility.
    ///
    /// The edit is never rolled back. If it leaves [`crate::MAX_RECORDS`] or
    /// more records, the closure's output is discarded and `InvalidData` is
    /// returned, but the edited records stay installed and the view is laid
    /// out over them; shrink the sequence through another `modify` before
    /// relying on positions again.
    pub fn modify<T>(&mut self, f: impl FnOnce(&mut S) -> T) -> Result<T, IndexError> {
        let out = f(&mut self.records);
        self.records.settle();

        record(MetricsEvent::Mutation);
        self.relayout();

        validate_len(self.records.len()).map(|()| out)
    }

    // Retire cached positions and the cursor, and re-derive boundaries.
    fn relayout(&mut self) {
        self.cache.advance();
        self.cursor = Cursor::Empty;
        self.bounds = Boundaries::derive(self.records.as_slice(), &self.key_field);
    }

    ///
    /// POINT QUERIES
    ///

    /// Resolve the cursor for `value`. Read the result through
    /// [`Self::cursor_state`] or [`Self::current`].
    pub fn fetch(&mut self, value: &Value) -> &mut Self {
        record(MetricsEvent::Fetch);
        self.cursor = self.resolve(value);

        self
    }

    fn resolve(&mut self, value: &Value) -> Cursor {
        let (Some(min), Some(max)) = (&self.bounds.min, &self.bounds.max) else {
            return Cursor::Empty;
        };

        if self.comparator.compare(value, min) == Ordering::Less {
            record(MetricsEvent::BoundaryShortCircuit);
            return Cursor::Gap {
                low: None,
                high: Some(0),
            };
        }
        if self.comparator.compare(value, max) == Ordering::Greater {
            record(MetricsEvent::BoundaryShortCircuit);
            return Cursor::Gap {
                low: Some(self.records.len() - 1),
                high: None,
            };
        }

        match self.cache.lookup(value) {
            CacheLookup::Hit(outcome) => {
                record(MetricsEvent::CacheHit);
                return outcome.into();
            }
            CacheLookup::Stale => record(MetricsEvent::CacheStale),
            CacheLookup::Miss => record(MetricsEvent::CacheMiss),
        }

        let request = SearchRequest::full(
            self.records.as_slice(),
            &self.key_field,
            &self.comparator,
            value,
        );

        self.engine.search(&request, &mut self.cache).into()
    }

    /// Record under the exact cursor after optionally fetching `value`.
    ///
    /// Any `Some(value)` is a real query, zero and empty text included.
    pub fn get(&mut self, value: Option<&Value>) -> Option<&R> {
        if let Some(value) = value {
            self.fetch(value);
        }

        self.current()
    }

    /// Record under the exact cursor, without querying.
    #[must_use]
    pub fn current(&self) -> Option<&R> {
        self.cursor
            .cursor()
            .and_then(|index| self.records.as_slice().get(index))
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn cursor_state(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor.cursor()
    }

    #[must_use]
    pub const fn next_low(&self) -> Option<usize> {
        self.cursor.next_low()
    }

    #[must_use]
    pub const fn next_high(&self) -> Option<usize> {
        self.cursor.next_high()
    }

    #[must_use]
    pub const fn min_value(&self) -> Option<&Value> {
        self.bounds.min.as_ref()
    }

    #[must_use]
    pub const fn max_value(&self) -> Option<&Value> {
        self.bounds.max.as_ref()
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        self.records.as_slice()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn key_field(&self) -> &KeyField {
        &self.key_field
    }

    #[must_use]
    pub const fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.cache.generation()
    }

    #[must_use]
    pub const fn cache(&self) -> &PositionCache {
        &self.cache
    }

    /// Number of cached positions, stale ones included.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached position. The generation is left untouched.
    pub fn clear_cache(&mut self) -> &mut Self {
        self.cache.clear();
        self
    }

    /// Hand back the backing sequence.
    pub fn into_inner(self) -> S {
        self.records
    }
}

impl<R: FieldValues> IndexedView<R, Vec<R>> {
    /// Insert `item` after any records with an equal key, keeping order.
    /// Returns the insertion index.
    pub fn insert(&mut self, item: R) -> Result<usize, IndexError> {
        let key = self.key_field.require(&item)?;
        validate_len(self.records.len() + 1)?;

        let key_field = &self.key_field;
        let comparator = &self.comparator;
        let index = self
            .records
            .partition_point(|r| comparator.compare(&key_field.read(r), &key) != Ordering::Greater);
        self.records.insert(index, item);

        record(MetricsEvent::Mutation);
        self.relayout();

        Ok(index)
    }

    /// Append without ordering; call [`Self::sort`] before querying.
    pub fn push(&mut self, item: R) -> Result<(), IndexError> {
        self.key_field.require(&item)?;
        validate_len(self.records.len() + 1)?;
        self.records.push(item);

        record(MetricsEvent::Mutation);
        self.relayout();

        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<R> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);

        record(MetricsEvent::Mutation);
        self.relayout();

        Some(removed)
    }
}

impl<R, S> fmt::Debug for IndexedView<R, S>
where
    R: FieldValues,
    S: SortableSequence<R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedView")
            .field("len", &self.records.len())
            .field("key_field", &self.key_field)
            .field("comparator", &self.comparator)
            .field("bounds", &self.bounds)
            .field("cursor", &self.cursor)
            .field("generation", &self.cache.generation())
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
