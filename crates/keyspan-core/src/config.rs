//! View configuration, loadable from TOML.
//!
//! ```toml
//! key_field = "id"
//! comparator = "numeric"   # auto | numeric | lexical
//! memoize = true
//! ```

use crate::{model::KeyField, value::ComparatorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// IndexConfig
///
/// Construction-time settings for an indexed view.
/// `memoize = false` runs every point query through the search engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    pub key_field: KeyField,

    #[serde(default)]
    pub comparator: ComparatorKind,

    #[serde(default = "IndexConfig::default_memoize")]
    pub memoize: bool,
}

impl IndexConfig {
    #[must_use]
    pub const fn new(key_field: KeyField) -> Self {
        Self {
            key_field,
            comparator: ComparatorKind::Auto,
            memoize: true,
        }
    }

    #[must_use]
    pub const fn with_comparator(mut self, comparator: ComparatorKind) -> Self {
        self.comparator = comparator;
        self
    }

    #[must_use]
    pub const fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    const fn default_memoize() -> bool {
        true
    }
}
