use crate::search::SearchOutcome;
use serde::{Deserialize, Serialize};

///
/// Cursor
///
/// Resolved position after the most recent point query.
///
/// Exact        → the query matched the record at this index.
/// Gap          → the query fell between `low` and `high` (either may be
///                absent at the ends of the sequence).
/// Empty        → nothing resolved: the sequence has no records, or no
///                query has run since the last layout change.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Cursor {
    Exact(usize),
    Gap {
        low: Option<usize>,
        high: Option<usize>,
    },
    #[default]
    Empty,
}

impl Cursor {
    /// Exact-match index, if any.
    #[must_use]
    pub const fn cursor(self) -> Option<usize> {
        match self {
            Self::Exact(index) => Some(index),
            Self::Gap { .. } | Self::Empty => None,
        }
    }

    /// Highest index whose key is below the last query.
    #[must_use]
    pub const fn next_low(self) -> Option<usize> {
        match self {
            Self::Gap { low, .. } => low,
            Self::Exact(_) | Self::Empty => None,
        }
    }

    /// Lowest index whose key is above the last query.
    #[must_use]
    pub const fn next_high(self) -> Option<usize> {
        match self {
            Self::Gap { high, .. } => high,
            Self::Exact(_) | Self::Empty => None,
        }
    }
}

impl From<SearchOutcome> for Cursor {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Exact(index) => Self::Exact(index),
            SearchOutcome::Gap { prev, next } => Self::Gap {
                low: prev,
                high: next,
            },
        }
    }
}
