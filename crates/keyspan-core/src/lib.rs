//! Core runtime for keyspan: key values, comparators, the binary search
//! engine, the generation-stamped position cache, and the indexed view that
//! ties them together.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod record;
pub mod search;
pub mod sequence;
pub mod value;
pub mod view;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Exclusive upper bound on the number of records a view will index.
///
/// Positions are reported as `usize` and stay representable on 32-bit
/// targets.
pub const MAX_RECORDS: u64 = 1 << 32;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::KeyField,
        record::{FieldValues, Row},
        search::{SearchOutcome, SearchRequest},
        value::{Comparator, ComparatorKind, Value},
        view::{Cursor, IndexedView},
    };
}
