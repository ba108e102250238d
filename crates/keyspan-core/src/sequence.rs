//! Backing-collection capability for indexed views.
//!
//! A view needs three things from its collection: a finite length, ordered
//! slice access, and a total in-place reorder. Those are expressed as one
//! trait; the only runtime check left is the length ceiling.

use crate::{MAX_RECORDS, error::IndexError};
use std::{cmp::Ordering, collections::VecDeque};

///
/// SortableSequence
///
/// Ordered, finite, in-place sortable collection of records.
///

pub trait SortableSequence<R> {
    fn as_slice(&self) -> &[R];

    /// Reorder in place; must be stable.
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&R, &R) -> Ordering;

    /// Restore whatever layout `as_slice` relies on after external edits.
    fn settle(&mut self) {}

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<R> SortableSequence<R> for Vec<R> {
    fn as_slice(&self) -> &[R] {
        self
    }

    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&R, &R) -> Ordering,
    {
        self.as_mut_slice().sort_by(compare);
    }
}

impl<R> SortableSequence<R> for Box<[R]> {
    fn as_slice(&self) -> &[R] {
        self
    }

    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&R, &R) -> Ordering,
    {
        <[R]>::sort_by(self, compare);
    }
}

// `as_slice` needs a contiguous buffer; the view settles the deque at
// construction and after every edit it lends out.
impl<R> SortableSequence<R> for VecDeque<R> {
    fn as_slice(&self) -> &[R] {
        let (front, back) = self.as_slices();
        debug_assert!(back.is_empty(), "deque must be contiguous");
        front
    }

    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&R, &R) -> Ordering,
    {
        self.make_contiguous().sort_by(compare);
    }

    fn settle(&mut self) {
        self.make_contiguous();
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

/// Validate a record count against the view's length ceiling.
pub(crate) fn validate_len(len: usize) -> Result<(), IndexError> {
    let within = u64::try_from(len).is_ok_and(|len| len < MAX_RECORDS);
    if within {
        Ok(())
    } else {
        Err(IndexError::invalid_data(format!(
            "sequence length {len} exceeds the {MAX_RECORDS} record limit"
        )))
    }
}
