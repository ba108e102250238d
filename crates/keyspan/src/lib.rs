//! ## Crate layout
//! - `core`: key values, comparators, search engine, position cache,
//!   the indexed view, configuration, and observability.
//!
//! The `prelude` module carries the vocabulary most callers need to build a
//! view over their own records and query it.

pub use keyspan_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    MAX_RECORDS,
    config::IndexConfig,
    error::{ErrorClass, IndexError},
};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::IndexConfig,
        model::KeyField,
        record::{FieldValues, Row},
        search::{BinarySearch, SearchEngine as _, SearchOutcome, SearchRequest},
        sequence::SortableSequence as _,
        value::{Comparator, ComparatorKind, Float64, Value},
        view::{Cursor, IndexedView},
    };
    pub use serde::{Deserialize, Serialize};
}
