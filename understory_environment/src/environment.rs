// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only access to the environment during unit construction.

use core::fmt;
use core::marker::PhantomData;

use crate::key::EnvironmentKey;
use crate::layout::{LayoutDirection, LayoutDirectionKey};
use crate::values::{EnvironmentValues, SnapshotId};

/// The environment in effect at a unit's position in the tree.
///
/// This is what a [`Component`](crate::Component) receives while building its
/// body. It only exposes reads; the only way to change what a subtree sees is
/// for an ancestor to attach [`Overrides`](crate::Overrides) to the edge above
/// it.
///
/// # Example
///
/// ```rust
/// use understory_environment::{Environment, EnvironmentValues, environment_key};
///
/// environment_key! {
///     pub MyEnvironmentKey: i32 = 0;
/// }
///
/// let values = EnvironmentValues::new().with_override::<MyEnvironmentKey>(7);
/// let env = Environment::new(&values);
/// assert_eq!(env.get::<MyEnvironmentKey>(), 7);
/// ```
#[derive(Copy, Clone)]
pub struct Environment<'a> {
    values: &'a EnvironmentValues,
}

impl<'a> Environment<'a> {
    /// Wraps a snapshot for reading.
    #[must_use]
    #[inline]
    pub fn new(values: &'a EnvironmentValues) -> Self {
        Self { values }
    }

    /// Resolves `K` against the snapshot in effect.
    #[must_use]
    #[inline]
    pub fn get<K: EnvironmentKey>(self) -> K::Value {
        self.values.get::<K>()
    }

    /// Returns the explicit binding for `K`, if any ancestor set one.
    #[must_use]
    #[inline]
    pub fn get_explicit<K: EnvironmentKey>(self) -> Option<&'a K::Value> {
        self.values.get_explicit::<K>()
    }

    /// Returns the layout direction in effect.
    #[must_use]
    #[inline]
    pub fn layout_direction(self) -> LayoutDirection {
        self.get::<LayoutDirectionKey>()
    }

    /// Returns the identity of the snapshot in effect.
    #[must_use]
    #[inline]
    pub fn snapshot_id(self) -> SnapshotId {
        self.values.id()
    }

    /// Returns the underlying snapshot.
    ///
    /// Snapshots are immutable, so this cannot be used to change what the
    /// surrounding tree observes.
    #[must_use]
    #[inline]
    pub fn snapshot(self) -> &'a EnvironmentValues {
        self.values
    }
}

impl fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Environment").field(self.values).finish()
    }
}

/// A typed reader binding for one key.
///
/// `Reader<K>` is zero-sized and `Copy`. A unit can keep one as a field and
/// resolve it against whichever environment it is built in, which may differ
/// each time the unit is composed.
///
/// # Example
///
/// ```rust
/// use understory_environment::{Environment, EnvironmentValues, Reader, environment_key};
///
/// environment_key! {
///     pub MyEnvironmentKey: i32 = 0;
/// }
///
/// struct MySubView {
///     my_value: Reader<MyEnvironmentKey>,
/// }
///
/// let view = MySubView { my_value: Reader::new() };
///
/// let root = EnvironmentValues::new();
/// let scoped = root.with_override::<MyEnvironmentKey>(7);
///
/// assert_eq!(view.my_value.resolve(Environment::new(&root)), 0);
/// assert_eq!(view.my_value.resolve(Environment::new(&scoped)), 7);
/// ```
pub struct Reader<K> {
    _marker: PhantomData<fn() -> K>,
}

impl<K: EnvironmentKey> Reader<K> {
    /// Creates a reader for `K`.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Resolves the bound key in `env`.
    #[must_use]
    #[inline]
    pub fn resolve(self, env: Environment<'_>) -> K::Value {
        env.get::<K>()
    }
}

// Manual trait implementations to avoid requiring K: Clone, etc.

impl<K> Copy for Reader<K> {}

impl<K> Clone for Reader<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EnvironmentKey> Default for Reader<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EnvironmentKey> fmt::Debug for Reader<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reader").field(&K::name()).finish()
    }
}
