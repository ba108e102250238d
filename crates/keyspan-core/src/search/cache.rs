use crate::{search::SearchOutcome, value::Value};
use derive_more::Display;
use std::collections::HashMap;

///
/// Generation
///
/// Monotonic stamp of the backing sequence's layout. Every mutation the view
/// performs advances it; cache entries stamped with an older generation are
/// stale.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("gen#{_0}")]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

///
/// CacheLookup
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheLookup {
    Hit(SearchOutcome),
    Stale,
    Miss,
}

///
/// CacheEntry
///

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    outcome: SearchOutcome,
    generation: Generation,
}

///
/// PositionCache
///
/// Memo of query value -> resolved position, keyed by the literal queried
/// value. Search engines write through it; the view reads it before
/// searching. A disabled cache accepts writes and forgets them.
///

#[derive(Clone, Debug)]
pub struct PositionCache {
    entries: HashMap<Value, CacheEntry>,
    generation: Generation,
    enabled: bool,
}

impl PositionCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            generation: Generation::default(),
            enabled: true,
        }
    }

    /// Cache that never retains outcomes; every lookup misses.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Advance the generation, turning every existing entry stale.
    pub fn advance(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }

    /// Record an outcome under the current generation.
    pub fn insert(&mut self, value: Value, outcome: SearchOutcome) {
        if !self.enabled {
            return;
        }

        self.entries.insert(
            value,
            CacheEntry {
                outcome,
                generation: self.generation,
            },
        );
    }

    #[must_use]
    pub fn lookup(&self, value: &Value) -> CacheLookup {
        match self.entries.get(value) {
            Some(entry) if entry.generation == self.generation => CacheLookup::Hit(entry.outcome),
            Some(_) => CacheLookup::Stale,
            None => CacheLookup::Miss,
        }
    }

    /// Fresh outcome for `value`, if any.
    #[must_use]
    pub fn get(&self, value: &Value) -> Option<SearchOutcome> {
        match self.lookup(value) {
            CacheLookup::Hit(outcome) => Some(outcome),
            CacheLookup::Stale | CacheLookup::Miss => None,
        }
    }

    /// Number of retained entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop stale entries eagerly; returns how many were removed.
    pub fn prune_stale(&mut self) -> usize {
        let before = self.entries.len();
        let generation = self.generation;
        self.entries.retain(|_, entry| entry.generation == generation);

        before - self.entries.len()
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new()
    }
}
