// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Environment: scoped, inheritable environment values.
//!
//! This crate provides the "environment" of a declarative UI tree: typed
//! configuration values that flow from ancestors to descendants, can be
//! overridden for one subtree, and are read by units while they build their
//! content.
//!
//! ## Core Concepts
//!
//! - [`EnvironmentKey`]: a typed configuration axis with a static default.
//!   Declare keys with [`environment_key!`]. Each key is its own Rust type, so
//!   identities cannot collide and an undeclared key cannot be named.
//! - [`EnvironmentValues`]: an immutable snapshot. Lookups are total (missing
//!   keys resolve to their default) and overrides derive a new snapshot
//!   instead of mutating the receiver.
//! - [`Overrides`]: the ordered bindings attached to one composition edge.
//!   When one key is bound twice on an edge, the last binding wins.
//! - [`Environment`] and [`Reader`]: read-only access for a unit while it
//!   builds its body.
//! - [`Element`], [`Component`] and [`render`]: a minimal composition host
//!   that threads snapshots down the tree explicitly. There is no global or
//!   thread-local "current environment".
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_environment::{
//!     Component, Element, Environment, EnvironmentValues, Reader, environment_key, render,
//! };
//!
//! environment_key! {
//!     /// A custom integer axis, 0 unless overridden.
//!     pub MyEnvironmentKey: i32 = 0;
//! }
//!
//! struct MySubView {
//!     my_value: Reader<MyEnvironmentKey>,
//! }
//!
//! impl Component for MySubView {
//!     fn body(&self, env: Environment<'_>) -> Element {
//!         Element::text(self.my_value.resolve(env).to_string())
//!     }
//! }
//!
//! let content = Element::stack([
//!     Element::stack([
//!         Element::component(MySubView { my_value: Reader::new() })
//!             .environment::<MyEnvironmentKey>(7),
//!     ]),
//!     Element::component(MySubView { my_value: Reader::new() }),
//! ]);
//!
//! let rendered = render(&content, &EnvironmentValues::new());
//! assert_eq!(rendered.texts(), ["7", "0"]);
//! ```
//!
//! ## Precedence
//!
//! Walking from the root to a reader, each scoped edge derives a snapshot from
//! the one above it. The binding nearest the reader shadows every ancestor
//! binding for the same key. Bindings are never merged or combined.
//!
//! ## Concurrency
//!
//! Values must be `Send + Sync` and snapshots are immutable, so a snapshot can
//! be read from several threads without locking. [`ResolutionCache`] keys its
//! entries by `(unit, SnapshotId)` so cached values never outlive a change to
//! the overrides above a unit.
//!
//! ## Tracing
//!
//! [`render_with_trace`] reports scope derivations and component builds to a
//! [`RenderTrace`] sink such as [`RenderRecorder`]. With the `tracing`
//! feature, the same events are also emitted as `tracing` events at `TRACE`
//! level.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod cache;
mod compose;
mod environment;
mod key;
mod layout;
mod overrides;
mod trace;
mod value;
mod values;

pub use cache::{CacheStats, ResolutionCache};
pub use compose::{Component, Element, Rendered, render, render_with_trace};
pub use environment::{Environment, Reader};
pub use key::{EnvironmentKey, KeyId};
pub use layout::{LayoutDirection, LayoutDirectionKey, ParseLayoutDirectionError};
pub use overrides::Overrides;
pub use trace::{NoTrace, RenderEvent, RenderRecorder, RenderTrace, ValueSource};
pub use value::ErasedValue;
pub use values::{EnvironmentValues, SnapshotId};
