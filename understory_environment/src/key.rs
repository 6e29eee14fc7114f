// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment key declaration and identification.
//!
//! This module provides the [`EnvironmentKey`] trait for declaring a
//! configuration axis, and [`KeyId`] for identifying one at runtime.

use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A typed configuration axis with a static default value.
///
/// Each key is its own Rust type, so two keys can never share an identity and
/// a key that was never declared cannot be named. Resolution against an
/// [`EnvironmentValues`](crate::EnvironmentValues) snapshot is therefore total:
/// when nothing overrides the key, [`default_value`](Self::default_value) is
/// returned.
///
/// Most keys are declared with [`environment_key!`](crate::environment_key).
///
/// # Example
///
/// ```rust
/// use understory_environment::{EnvironmentKey, EnvironmentValues};
///
/// struct AccentColor;
///
/// impl EnvironmentKey for AccentColor {
///     type Value = u32;
///
///     fn default_value() -> u32 {
///         0x0078D4
///     }
/// }
///
/// let env = EnvironmentValues::new();
/// assert_eq!(env.get::<AccentColor>(), 0x0078D4);
/// ```
pub trait EnvironmentKey: 'static {
    /// The type of value carried by this key.
    type Value: Clone + Send + Sync + 'static;

    /// Returns the value seen by any unit with no override in scope.
    ///
    /// This must return the same value on every call.
    fn default_value() -> Self::Value;

    /// A human-readable name for diagnostics.
    fn name() -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A runtime identifier for an [`EnvironmentKey`].
///
/// Equality, ordering and hashing only consider the key's [`TypeId`]; the
/// name is carried along for `Debug` output and tracing.
///
/// # Example
///
/// ```rust
/// use understory_environment::{KeyId, environment_key};
///
/// environment_key! {
///     /// Line limit for text.
///     pub LineLimit: Option<u32> = None;
/// }
///
/// let id = KeyId::of::<LineLimit>();
/// assert_eq!(id.name(), "LineLimit");
/// assert_eq!(id, KeyId::of::<LineLimit>());
/// ```
#[derive(Copy, Clone)]
pub struct KeyId {
    type_id: TypeId,
    name: &'static str,
}

impl KeyId {
    /// Returns the identifier for key `K`.
    #[must_use]
    #[inline]
    pub fn of<K: EnvironmentKey>() -> Self {
        Self {
            type_id: TypeId::of::<K>(),
            name: K::name(),
        }
    }

    /// Returns the key's diagnostic name.
    #[must_use]
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the key type.
    #[must_use]
    #[inline]
    pub fn type_id(self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for KeyId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for KeyId {}

impl PartialOrd for KeyId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_id.cmp(&other.type_id)
    }
}

impl Hash for KeyId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyId").field(&self.name).finish()
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declares one or more [`EnvironmentKey`] types.
///
/// Each entry produces a unit struct and an `EnvironmentKey` impl whose
/// [`name`](EnvironmentKey::name) is the struct's identifier.
///
/// ```rust
/// use understory_environment::{EnvironmentValues, environment_key};
///
/// environment_key! {
///     /// A custom integer axis.
///     pub MyEnvironmentKey: i32 = 0;
///     /// Minimum scale factor for text.
///     pub MinimumScaleFactor: f64 = 1.0;
/// }
///
/// let env = EnvironmentValues::new().with_override::<MyEnvironmentKey>(7);
/// assert_eq!(env.get::<MyEnvironmentKey>(), 7);
/// assert_eq!(env.get::<MinimumScaleFactor>(), 1.0);
/// ```
#[macro_export]
macro_rules! environment_key {
    (
        $(
            $(#[$attr:meta])*
            $vis:vis $name:ident: $ty:ty = $default:expr;
        )+
    ) => {
        $(
            $(#[$attr])*
            #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
            $vis struct $name;

            impl $crate::EnvironmentKey for $name {
                type Value = $ty;

                #[inline]
                fn default_value() -> Self::Value {
                    $default
                }

                #[inline]
                fn name() -> &'static str {
                    stringify!($name)
                }
            }
        )+
    };
}
