// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Override sets attached to a composition edge.

use smallvec::SmallVec;

use crate::key::{EnvironmentKey, KeyId};
use crate::value::ErasedValue;
use crate::values::EnvironmentValues;

/// Most edges carry one or two overrides.
const INLINE_CAPACITY: usize = 2;

/// An ordered list of `(key, value)` bindings for one composition edge.
///
/// Bindings are kept in the order they were written. Applying the set walks
/// them in that order, so if one key is bound twice only the last binding
/// takes effect.
///
/// # Example
///
/// ```rust
/// use understory_environment::{EnvironmentValues, Overrides, environment_key};
///
/// environment_key! {
///     pub LineLimit: u32 = 0;
/// }
///
/// let overrides = Overrides::new()
///     .set::<LineLimit>(5)
///     .set::<LineLimit>(9);
///
/// let env = overrides.apply(&EnvironmentValues::new());
/// assert_eq!(env.get::<LineLimit>(), 9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    entries: SmallVec<[(KeyId, ErasedValue); INLINE_CAPACITY]>,
}

impl Overrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding, builder style.
    #[must_use]
    pub fn set<K: EnvironmentKey>(mut self, value: K::Value) -> Self {
        self.push::<K>(value);
        self
    }

    /// Appends a binding.
    pub fn push<K: EnvironmentKey>(&mut self, value: K::Value) {
        self.entries.push((KeyId::of::<K>(), ErasedValue::new(value)));
    }

    /// Appends every binding of `other` after the bindings already here.
    pub fn extend(&mut self, other: &Self) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// Returns the number of bindings, counting repeated keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no bindings.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `K` is bound at least once.
    #[must_use]
    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        let id = KeyId::of::<K>();
        self.entries.iter().any(|(key, _)| *key == id)
    }

    /// Returns the keys in declaration order, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Returns the value the set would bind for `K`, if any.
    ///
    /// This is the last binding for `K` in declaration order.
    #[must_use]
    pub fn effective<K: EnvironmentKey>(&self) -> Option<&K::Value> {
        let id = KeyId::of::<K>();
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| *key == id)
            .and_then(|(_, value)| value.downcast_ref())
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[(KeyId, ErasedValue)] {
        &self.entries
    }

    /// Derives the snapshot for the subtree below this edge from the
    /// `parent` snapshot.
    #[must_use]
    pub fn apply(&self, parent: &EnvironmentValues) -> EnvironmentValues {
        parent.with_overrides(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::environment_key! {
        Count: i32 = 0;
        Enabled: bool = true;
    }

    #[test]
    fn overrides_new_is_empty() {
        let overrides = Overrides::new();
        assert!(overrides.is_empty());
        assert_eq!(overrides.len(), 0);
        assert!(!overrides.contains::<Count>());
        assert_eq!(overrides.effective::<Count>(), None);
    }

    #[test]
    fn overrides_keep_declaration_order() {
        let overrides = Overrides::new().set::<Enabled>(false).set::<Count>(1).set::<Enabled>(true);

        let keys: alloc::vec::Vec<_> = overrides.keys().collect();
        assert_eq!(
            keys,
            [
                KeyId::of::<Enabled>(),
                KeyId::of::<Count>(),
                KeyId::of::<Enabled>()
            ]
        );
        assert_eq!(overrides.len(), 3);
    }

    #[test]
    fn repeated_key_last_binding_wins() {
        let overrides = Overrides::new().set::<Count>(5).set::<Count>(9);
        assert_eq!(overrides.effective::<Count>(), Some(&9));

        let env = overrides.apply(&EnvironmentValues::new());
        assert_eq!(env.get::<Count>(), 9);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn apply_leaves_parent_unchanged() {
        let parent = EnvironmentValues::new().with_override::<Count>(2);
        let child = Overrides::new().set::<Enabled>(false).apply(&parent);

        assert_eq!(child.get::<Count>(), 2);
        assert!(!child.get::<Enabled>());
        assert!(parent.get::<Enabled>());
    }

    #[test]
    fn extend_appends_after_existing() {
        let mut first = Overrides::new().set::<Count>(1);
        let second = Overrides::new().set::<Count>(2);
        first.extend(&second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.effective::<Count>(), Some(&2));
    }

    #[test]
    fn push_matches_set() {
        let mut pushed = Overrides::new();
        pushed.push::<Count>(4);
        assert!(pushed.contains::<Count>());
        assert_eq!(pushed.effective::<Count>(), Some(&4));
    }
}
