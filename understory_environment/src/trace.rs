// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability helpers for environment propagation.
//!
//! Rendering does not keep a record of which snapshot reached which unit.
//! When an embedder wants to answer "why does this unit see that value?",
//! it can pass a [`RenderTrace`] to [`render_with_trace`](crate::render_with_trace).
//! [`RenderRecorder`] is a ready-made sink that keeps every event.

use alloc::vec::Vec;

use crate::key::KeyId;
use crate::overrides::Overrides;
use crate::values::{EnvironmentValues, SnapshotId};

/// Where a resolved value comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueSource {
    /// An ancestor bound the key explicitly.
    Override,
    /// No binding is in scope; the key's default applies.
    Default,
}

/// A callback sink for render passes.
///
/// All methods have empty default bodies so a sink only implements what it
/// needs. `depth` counts tree levels from the root, which is depth 0.
pub trait RenderTrace {
    /// Called when a scoped edge derives a new snapshot for its subtree.
    fn scope(
        &mut self,
        depth: usize,
        parent: &EnvironmentValues,
        overrides: &Overrides,
        derived: &EnvironmentValues,
    ) {
        let _ = (depth, parent, overrides, derived);
    }

    /// Called right before a component builds its body.
    fn component(&mut self, depth: usize, name: &'static str, snapshot: SnapshotId) {
        let _ = (depth, name, snapshot);
    }
}

/// A [`RenderTrace`] that ignores every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTrace;

impl RenderTrace for NoTrace {}

/// One recorded render event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    /// A scoped edge derived a snapshot.
    Scope {
        /// Tree depth of the scoped edge.
        depth: usize,
        /// The snapshot in effect above the edge.
        parent: SnapshotId,
        /// The snapshot handed to the subtree.
        derived: SnapshotId,
        /// Overridden keys in declaration order.
        keys: Vec<KeyId>,
    },
    /// A component built its body.
    Component {
        /// Tree depth of the component.
        depth: usize,
        /// The component's name.
        name: &'static str,
        /// The snapshot the component read from.
        snapshot: SnapshotId,
    },
}

/// Records every render event in order.
#[derive(Clone, Debug, Default)]
pub struct RenderRecorder {
    events: Vec<RenderEvent>,
}

impl RenderRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the snapshot the named component read from, if it was built.
    ///
    /// When the component was built more than once, the first is returned.
    #[must_use]
    pub fn snapshot_of(&self, component: &str) -> Option<SnapshotId> {
        self.events.iter().find_map(|event| match event {
            RenderEvent::Component { name, snapshot, .. } if *name == component => Some(*snapshot),
            _ => None,
        })
    }

    /// Walks back from `snapshot` to the root, returning the scoped edges that
    /// produced it, nearest first.
    #[must_use]
    pub fn scope_chain(&self, snapshot: SnapshotId) -> Vec<&RenderEvent> {
        let mut chain = Vec::new();
        let mut current = snapshot;
        while let Some(event) = self.derivation_of(current) {
            chain.push(event);
            match event {
                RenderEvent::Scope { parent, .. } if *parent != current => current = *parent,
                _ => break,
            }
        }
        chain
    }

    fn derivation_of(&self, snapshot: SnapshotId) -> Option<&RenderEvent> {
        self.events.iter().find(|event| match event {
            RenderEvent::Scope { derived, .. } => *derived == snapshot,
            RenderEvent::Component { .. } => false,
        })
    }
}

impl RenderTrace for RenderRecorder {
    fn scope(
        &mut self,
        depth: usize,
        parent: &EnvironmentValues,
        overrides: &Overrides,
        derived: &EnvironmentValues,
    ) {
        self.events.push(RenderEvent::Scope {
            depth,
            parent: parent.id(),
            derived: derived.id(),
            keys: overrides.keys().collect(),
        });
    }

    fn component(&mut self, depth: usize, name: &'static str, snapshot: SnapshotId) {
        self.events.push(RenderEvent::Component {
            depth,
            name,
            snapshot,
        });
    }
}

impl<T: RenderTrace + ?Sized> RenderTrace for &mut T {
    fn scope(
        &mut self,
        depth: usize,
        parent: &EnvironmentValues,
        overrides: &Overrides,
        derived: &EnvironmentValues,
    ) {
        (**self).scope(depth, parent, overrides, derived);
    }

    fn component(&mut self, depth: usize, name: &'static str, snapshot: SnapshotId) {
        (**self).component(depth, name, snapshot);
    }
}
