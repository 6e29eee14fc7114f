// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable environment snapshots.
//!
//! This module provides [`EnvironmentValues`], the snapshot of bindings in
//! effect at one position of a unit tree, and [`SnapshotId`], its identity.
//!
//! # Implementation
//!
//! Bindings live in a sorted vector behind an [`Arc`], searched by [`KeyId`].
//! Deriving a snapshot copies the vector (values themselves are shared
//! [`ErasedValue`] handles) and inserts or replaces the overridden entries.
//! Environments rarely hold more than a handful of explicit bindings, so a
//! flat copy beats a persistent map on both lookup and memory.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::key::{EnvironmentKey, KeyId};
use crate::overrides::Overrides;
use crate::trace::ValueSource;
use crate::value::ErasedValue;

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`EnvironmentValues`] snapshot.
///
/// Every snapshot created by [`EnvironmentValues::new`] or derived by an
/// override gets a fresh id. Clones of a snapshot keep its id.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(u64);

impl SnapshotId {
    fn next() -> Self {
        Self(NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnapshotId").field(&self.0).finish()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable snapshot of environment bindings.
///
/// Lookups are total: a key with no explicit binding resolves to its
/// [`EnvironmentKey::default_value`]. Overrides never mutate a snapshot; they
/// derive a new one, so any subtree still holding the old snapshot keeps
/// observing the old values.
///
/// Snapshots are cheap to clone and are `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use understory_environment::{EnvironmentValues, environment_key};
///
/// environment_key! {
///     pub FontSize: f64 = 12.0;
/// }
///
/// let root = EnvironmentValues::new();
/// let large = root.with_override::<FontSize>(24.0);
///
/// assert_eq!(root.get::<FontSize>(), 12.0);
/// assert_eq!(large.get::<FontSize>(), 24.0);
/// ```
#[derive(Clone)]
pub struct EnvironmentValues {
    /// Explicit bindings, sorted by [`KeyId`].
    entries: Arc<Vec<(KeyId, ErasedValue)>>,
    id: SnapshotId,
}

impl EnvironmentValues {
    /// Creates a snapshot with no explicit bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            id: SnapshotId::next(),
        }
    }

    fn derive(entries: Vec<(KeyId, ErasedValue)>) -> Self {
        Self {
            entries: Arc::new(entries),
            id: SnapshotId::next(),
        }
    }

    /// Returns this snapshot's identity.
    #[must_use]
    #[inline]
    pub fn id(&self) -> SnapshotId {
        self.id
    }

    /// Returns `true` if `other` is a clone of this snapshot.
    #[must_use]
    #[inline]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns the number of explicit bindings.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if every key resolves to its default.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the keys with explicit bindings, in [`KeyId`] order.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    #[inline]
    fn find(&self, id: KeyId) -> Option<&ErasedValue> {
        self.entries
            .binary_search_by_key(&id, |(key, _)| *key)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Resolves `K`: the explicit binding if there is one, else its default.
    #[must_use]
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        self.get_explicit::<K>()
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Returns the explicit binding for `K`, if any.
    #[must_use]
    #[inline]
    pub fn get_explicit<K: EnvironmentKey>(&self) -> Option<&K::Value> {
        let id = KeyId::of::<K>();
        self.find(id).and_then(ErasedValue::downcast_ref)
    }

    /// Returns `true` if `K` has an explicit binding.
    #[must_use]
    #[inline]
    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        self.find(KeyId::of::<K>()).is_some()
    }

    /// Reports where `K`'s resolved value comes from.
    #[must_use]
    pub fn source<K: EnvironmentKey>(&self) -> ValueSource {
        if self.contains::<K>() {
            ValueSource::Override
        } else {
            ValueSource::Default
        }
    }

    /// Derives a snapshot in which `K` resolves to `value`.
    ///
    /// All other bindings carry over unchanged and `self` is not modified.
    #[must_use]
    pub fn with_override<K: EnvironmentKey>(&self, value: K::Value) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        bind(&mut entries, KeyId::of::<K>(), ErasedValue::new(value));
        Self::derive(entries)
    }

    /// Derives a snapshot with every binding in `overrides` applied in
    /// declaration order.
    ///
    /// When `overrides` binds one key more than once, the last binding wins.
    /// An empty `overrides` yields a clone of `self` with the same id.
    #[must_use]
    pub fn with_overrides(&self, overrides: &Overrides) -> Self {
        if overrides.is_empty() {
            return self.clone();
        }
        let mut entries = Vec::with_capacity(self.entries.len() + overrides.len());
        entries.extend(self.entries.iter().cloned());
        for (id, value) in overrides.entries() {
            bind(&mut entries, *id, value.clone());
        }
        Self::derive(entries)
    }
}

/// Inserts or replaces `id` in the sorted `entries`.
fn bind(entries: &mut Vec<(KeyId, ErasedValue)>, id: KeyId, value: ErasedValue) {
    match entries.binary_search_by_key(&id, |(key, _)| *key) {
        Ok(idx) => entries[idx].1 = value,
        Err(idx) => entries.insert(idx, (id, value)),
    }
}

impl Default for EnvironmentValues {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvironmentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentValues")
            .field("id", &self.id)
            .field("keys", &self.keys().map(KeyId::name).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
