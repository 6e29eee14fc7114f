// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-unit cache of resolved environment values.
//!
//! A host that re-renders often can keep a [`ResolutionCache`] across passes.
//! Entries are tagged with the [`SnapshotId`] they were resolved against; when
//! a unit is next resolved under a different snapshot, which happens whenever
//! an ancestor's override set changed, its cached values are dropped first.

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::environment::Environment;
use crate::key::{EnvironmentKey, KeyId};
use crate::value::ErasedValue;
use crate::values::SnapshotId;

#[derive(Debug)]
struct CachedUnit {
    snapshot: SnapshotId,
    values: SmallVec<[(KeyId, ErasedValue); 4]>,
}

/// Hit, miss and invalidation counters for a [`ResolutionCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to resolve against the environment.
    pub misses: u64,
    /// Times a unit's entry was dropped because its snapshot changed.
    pub invalidations: u64,
}

/// Caches resolved values per `(unit, snapshot)`.
///
/// `U` identifies a unit instance in the host's tree.
///
/// # Example
///
/// ```rust
/// use understory_environment::{
///     Environment, EnvironmentValues, ResolutionCache, environment_key,
/// };
///
/// environment_key! {
///     pub MyEnvironmentKey: i32 = 0;
/// }
///
/// let mut cache = ResolutionCache::<u32>::new();
///
/// let first = EnvironmentValues::new().with_override::<MyEnvironmentKey>(7);
/// assert_eq!(cache.resolve::<MyEnvironmentKey>(1, Environment::new(&first)), 7);
/// assert_eq!(cache.resolve::<MyEnvironmentKey>(1, Environment::new(&first)), 7);
/// assert_eq!(cache.stats().hits, 1);
///
/// // An ancestor changed its override: the unit now sees a new snapshot.
/// let second = EnvironmentValues::new().with_override::<MyEnvironmentKey>(9);
/// assert_eq!(cache.resolve::<MyEnvironmentKey>(1, Environment::new(&second)), 9);
/// assert_eq!(cache.stats().invalidations, 1);
/// ```
#[derive(Debug)]
pub struct ResolutionCache<U> {
    units: HashMap<U, CachedUnit>,
    stats: CacheStats,
}

impl<U> Default for ResolutionCache<U> {
    fn default() -> Self {
        Self {
            units: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

impl<U: Copy + Eq + Hash> ResolutionCache<U> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `K` for `unit` in `env`, reusing a cached value when `unit`
    /// was last resolved against the same snapshot.
    pub fn resolve<K: EnvironmentKey>(&mut self, unit: U, env: Environment<'_>) -> K::Value {
        let snapshot = env.snapshot_id();
        let entry = self.units.entry(unit).or_insert_with(|| CachedUnit {
            snapshot,
            values: SmallVec::new(),
        });
        if entry.snapshot != snapshot {
            entry.snapshot = snapshot;
            entry.values.clear();
            self.stats.invalidations += 1;
        }

        let id = KeyId::of::<K>();
        if let Some(value) = entry
            .values
            .iter()
            .find(|(key, _)| *key == id)
            .and_then(|(_, value)| value.downcast_ref::<K::Value>())
        {
            self.stats.hits += 1;
            return value.clone();
        }

        self.stats.misses += 1;
        let value = env.get::<K>();
        entry.values.push((id, ErasedValue::new(value.clone())));
        value
    }

    /// Returns the snapshot `unit` was last resolved against.
    #[must_use]
    pub fn snapshot_of(&self, unit: U) -> Option<SnapshotId> {
        self.units.get(&unit).map(|cached| cached.snapshot)
    }

    /// Drops everything cached for `unit`.
    ///
    /// Returns `true` if the unit had an entry.
    pub fn remove(&mut self, unit: U) -> bool {
        self.units.remove(&unit).is_some()
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Returns the number of units with cached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the hit, miss and invalidation counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
