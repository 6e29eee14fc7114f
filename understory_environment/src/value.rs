// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared cells for bound environment values.
//!
//! Snapshots and override sets hold their values as [`ErasedValue`]s. A cell
//! is written once and then only shared: copying a snapshot's table to derive
//! a child bumps reference counts and never clones the values themselves.

use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

/// One bound value, shared between every snapshot that carries it.
///
/// The concrete type is recovered with [`downcast_ref`](Self::downcast_ref),
/// which the typed lookups on `EnvironmentValues` do with the key's `Value`
/// type. Cells are `Send + Sync`, so a table of them can be read from any
/// thread.
///
/// # Example
///
/// ```rust
/// use understory_environment::ErasedValue;
///
/// let limit = ErasedValue::new(3_u32);
/// let in_child_snapshot = limit.clone();
///
/// assert!(in_child_snapshot.ptr_eq(&limit));
/// assert_eq!(in_child_snapshot.downcast_ref::<u32>(), Some(&3));
/// assert_eq!(limit.downcast_ref::<i64>(), None);
/// ```
#[derive(Clone)]
pub struct ErasedValue(Arc<dyn Any + Send + Sync>);

impl ErasedValue {
    /// Moves `value` into a new shared cell.
    #[must_use]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// The [`TypeId`] of the value in the cell.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        Any::type_id(&*self.0)
    }

    /// Whether the cell holds a `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Borrows the value as a `T`, or `None` for any other type.
    #[must_use]
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Whether `self` and `other` are the same cell rather than equal values.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErasedValue").field(&self.type_id()).finish()
    }
}
