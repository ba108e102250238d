use crate::{
    error::IndexError,
    value::{Value, ValueFamily},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, sync::Arc};

// Both bounds are exact powers of two, so the float casts are lossless.
const I128_MIN_F64: f64 = -170_141_183_460_469_231_731_687_303_715_884_105_728.0;
const I128_MAX_F64: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Total canonical comparator.
///
/// Ordering rules:
/// 1. Family rank (`Null < Bool < Numeric < Textual`)
/// 2. Family-specific comparison for same-ranked values
///
/// Numeric values compare by magnitude across `Int`, `Uint` and `Float64`.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.family().cmp(&right.family());
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => numeric_order(left, right).unwrap_or(Ordering::Equal),
    }
}

/// Numeric comparator: magnitude order for numbers, canonical order otherwise.
#[must_use]
pub fn numeric_cmp(left: &Value, right: &Value) -> Ordering {
    numeric_order(left, right).unwrap_or_else(|| canonical_cmp(left, right))
}

/// Lexical comparator: both operands compared as their display strings.
#[must_use]
pub fn lexical_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Text(a), _) => a.as_str().cmp(right.to_string().as_str()),
        (_, Value::Text(b)) => left.to_string().as_str().cmp(b.as_str()),
        _ => left.to_string().cmp(&right.to_string()),
    }
}

// Exact cross-variant numeric ordering; `None` unless both sides are numbers.
fn numeric_order(left: &Value, right: &Value) -> Option<Ordering> {
    let ord = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Int(a), Value::Uint(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Uint(a), Value::Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Float64(a), Value::Float64(b)) => a.cmp(b),
        (Value::Float64(a), Value::Int(b)) => float_int_cmp(a.get(), i128::from(*b)),
        (Value::Float64(a), Value::Uint(b)) => float_int_cmp(a.get(), i128::from(*b)),
        (Value::Int(a), Value::Float64(b)) => float_int_cmp(b.get(), i128::from(*a)).reverse(),
        (Value::Uint(a), Value::Float64(b)) => float_int_cmp(b.get(), i128::from(*a)).reverse(),
        _ => return None,
    };

    Some(ord)
}

// Compare a finite float against an integer without rounding the integer.
#[allow(clippy::cast_possible_truncation)]
fn float_int_cmp(float: f64, int: i128) -> Ordering {
    let floor = float.floor();
    if floor < I128_MIN_F64 {
        return Ordering::Less;
    }
    if floor >= I128_MAX_F64 {
        return Ordering::Greater;
    }

    match (floor as i128).cmp(&int) {
        Ordering::Equal if float > floor => Ordering::Greater,
        ord => ord,
    }
}

///
/// ComparatorKind
///
/// Configuration-facing comparator selector.
/// `Auto` probes the minimum key once at construction.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    #[default]
    Auto,
    Numeric,
    Lexical,
}

impl ComparatorKind {
    /// Resolve this selector against the current minimum key value.
    ///
    /// `Auto` picks `Numeric` for a numeric probe and `Lexical` otherwise,
    /// including when there is no probe at all (empty sequence).
    pub fn resolve(self, probe: Option<&Value>) -> Result<Comparator, IndexError> {
        let comparator = match self {
            Self::Auto => probe.map_or(Comparator::Lexical, |value| value.family().into()),
            Self::Numeric => Comparator::Numeric,
            Self::Lexical => Comparator::Lexical,
        };
        comparator.check_compatible(probe)?;

        Ok(comparator)
    }
}

///
/// Comparator
///
/// Total order over key values. Built-ins cover numeric and lexical keys;
/// `Custom` wraps any caller-supplied ordering closure.
///

#[derive(Clone, Default)]
pub enum Comparator {
    Numeric,
    #[default]
    Lexical,
    Custom(Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>),
}

impl Comparator {
    pub fn custom(f: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn compare(&self, left: &Value, right: &Value) -> Ordering {
        match self {
            Self::Numeric => numeric_cmp(left, right),
            Self::Lexical => lexical_cmp(left, right),
            Self::Custom(f) => f(left, right),
        }
    }

    /// Built-in selector this comparator corresponds to, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ComparatorKind> {
        match self {
            Self::Numeric => Some(ComparatorKind::Numeric),
            Self::Lexical => Some(ComparatorKind::Lexical),
            Self::Custom(_) => None,
        }
    }

    /// Reject a numeric comparator over a non-numeric key.
    pub(crate) fn check_compatible(&self, probe: Option<&Value>) -> Result<(), IndexError> {
        match (self, probe) {
            (Self::Numeric, Some(value)) if !value.is_numeric() => {
                Err(IndexError::invalid_argument(format!(
                    "numeric comparator cannot order {:?} key '{value}'",
                    value.family(),
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("Numeric"),
            Self::Lexical => f.write_str("Lexical"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<ValueFamily> for Comparator {
    fn from(family: ValueFamily) -> Self {
        match family {
            ValueFamily::Numeric => Self::Numeric,
            ValueFamily::Null | ValueFamily::Bool | ValueFamily::Textual => Self::Lexical,
        }
    }
}
