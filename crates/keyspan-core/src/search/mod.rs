//! Module: search
//! Responsibility: resolve a query value to an exact position or the
//! enclosing gap within a sorted record slice.
//! Does not own: boundary short-circuits or cursor state (see `view`).
//! Boundary: every resolved outcome is written through the caller's
//! `PositionCache` before it is returned.

mod cache;

#[cfg(test)]
mod tests;

use crate::{
    model::KeyField,
    obs::sink::{MetricsEvent, record},
    record::FieldValues,
    value::{Comparator, Value},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// re-exports
pub use cache::{CacheLookup, Generation, PositionCache};

///
/// SearchOutcome
///
/// Resolved position for one query value.
/// A gap's `prev`/`next` are adjacent whenever both exist; either side is
/// `None` when the value falls beyond that end of the sequence.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SearchOutcome {
    Exact(usize),
    Gap {
        prev: Option<usize>,
        next: Option<usize>,
    },
}

impl SearchOutcome {
    #[must_use]
    pub const fn exact(self) -> Option<usize> {
        match self {
            Self::Exact(index) => Some(index),
            Self::Gap { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }

    /// Gap anchored on both sides of `index` within a slice of `len` records.
    const fn around(index: usize, len: usize, below: bool) -> Self {
        if below {
            Self::Gap {
                prev: index.checked_sub(1),
                next: Some(index),
            }
        } else {
            let next = index + 1;
            Self::Gap {
                prev: Some(index),
                next: if next < len { Some(next) } else { None },
            }
        }
    }
}

///
/// SearchRequest
///
/// Everything a search engine needs, passed explicitly.
/// `lower..=upper` is the inclusive index window to search.
///

#[derive(Debug)]
pub struct SearchRequest<'a, R> {
    pub records: &'a [R],
    pub key_field: &'a KeyField,
    pub comparator: &'a Comparator,
    pub value: &'a Value,
    pub lower: usize,
    pub upper: usize,
}

impl<'a, R> SearchRequest<'a, R> {
    /// Request covering the whole slice.
    #[must_use]
    pub const fn full(
        records: &'a [R],
        key_field: &'a KeyField,
        comparator: &'a Comparator,
        value: &'a Value,
    ) -> Self {
        Self {
            records,
            key_field,
            comparator,
            value,
            lower: 0,
            upper: records.len().saturating_sub(1),
        }
    }
}

impl<R: FieldValues> SearchRequest<'_, R> {
    /// Key value of the record at `index`.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Value {
        self.key_field.read(&self.records[index])
    }

    /// Compare the record key at `index` against the query value.
    #[must_use]
    pub fn compare_at(&self, index: usize) -> Ordering {
        self.comparator.compare(&self.key_at(index), self.value)
    }
}

///
/// SearchEngine
///
/// Strategy that resolves a request. Implementations must write their outcome
/// into `cache` keyed by `request.value`.
///

pub trait SearchEngine<R> {
    fn search(&self, request: &SearchRequest<'_, R>, cache: &mut PositionCache) -> SearchOutcome;
}

impl<R, F> SearchEngine<R> for F
where
    F: Fn(&SearchRequest<'_, R>, &mut PositionCache) -> SearchOutcome,
{
    fn search(&self, request: &SearchRequest<'_, R>, cache: &mut PositionCache) -> SearchOutcome {
        self(request, cache)
    }
}

///
/// BinarySearch
/// Default engine; delegates to [`binary_search`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySearch;

impl<R: FieldValues> SearchEngine<R> for BinarySearch {
    fn search(&self, request: &SearchRequest<'_, R>, cache: &mut PositionCache) -> SearchOutcome {
        binary_search(request, cache)
    }
}

///
/// binary_search
///
/// Halve `lower..=upper` until the value is found or the window collapses.
/// On collapse the gap comes from the sign of the final comparison, so the
/// pair is always adjacent: below `key(mid)` gives `(mid - 1, mid)`, above
/// gives `(mid, mid + 1)`. Writes the outcome into `cache`.
///

pub fn binary_search<R: FieldValues>(
    request: &SearchRequest<'_, R>,
    cache: &mut PositionCache,
) -> SearchOutcome {
    let (outcome, comparisons) = resolve(request);
    record(MetricsEvent::Search { comparisons });
    cache.insert(request.value.clone(), outcome);

    outcome
}

fn resolve<R: FieldValues>(request: &SearchRequest<'_, R>) -> (SearchOutcome, u64) {
    let len = request.records.len();
    if len == 0 {
        return (
            SearchOutcome::Gap {
                prev: None,
                next: None,
            },
            0,
        );
    }

    let mut lo = request.lower;
    let mut hi = request.upper.min(len - 1);
    if lo > hi {
        // Empty window: the gap sits just before `lo`.
        let next = (lo < len).then_some(lo);
        let prev = lo.checked_sub(1).filter(|prev| *prev < len);
        return (SearchOutcome::Gap { prev, next }, 0);
    }

    let mut comparisons = 0;
    loop {
        let mid = lo + (hi - lo) / 2;
        comparisons += 1;

        match request.compare_at(mid) {
            Ordering::Equal => return (SearchOutcome::Exact(mid), comparisons),

            // key(mid) > value: search below, or settle just before mid
            Ordering::Greater => {
                if mid == lo {
                    return (SearchOutcome::around(mid, len, true), comparisons);
                }
                hi = mid - 1;
            }

            // key(mid) < value: search above, or settle just after mid
            Ordering::Less => {
                if mid == hi {
                    return (SearchOutcome::around(mid, len, false), comparisons);
                }
                lo = mid + 1;
            }
        }
    }
}
