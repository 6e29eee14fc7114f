// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit trees and environment-threading render passes.
//!
//! An [`Element`] tree describes how units are composed. [`render`] walks it
//! top-down, handing each [`Component`] the snapshot in effect at its position
//! and deriving a new snapshot at every [`Element::Scoped`] edge. The derived
//! snapshot lives for exactly as long as its subtree is being rendered.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::environment::Environment;
use crate::key::EnvironmentKey;
use crate::overrides::Overrides;
use crate::trace::{NoTrace, RenderTrace};
use crate::values::EnvironmentValues;

/// A unit whose body depends on the environment.
///
/// `body` is called once per render pass with the environment in effect at
/// the unit's position. The same component value may be composed in several
/// places and will see a different environment in each.
///
/// Closures of type `Fn(Environment<'_>) -> Element` are components too.
///
/// # Example
///
/// ```rust
/// use understory_environment::{
///     Component, Element, Environment, EnvironmentValues, Reader, environment_key, render,
/// };
///
/// environment_key! {
///     pub MyEnvironmentKey: i32 = 0;
/// }
///
/// struct MySubView {
///     my_value: Reader<MyEnvironmentKey>,
/// }
///
/// impl Component for MySubView {
///     fn body(&self, env: Environment<'_>) -> Element {
///         Element::text(format!("{}", self.my_value.resolve(env)))
///     }
/// }
///
/// let tree = Element::stack([
///     Element::component(MySubView { my_value: Reader::new() })
///         .environment::<MyEnvironmentKey>(7),
///     Element::component(MySubView { my_value: Reader::new() }),
/// ]);
///
/// let rendered = render(&tree, &EnvironmentValues::new());
/// assert_eq!(rendered.texts(), ["7", "0"]);
/// ```
pub trait Component {
    /// Builds this unit's content for one render pass.
    fn body(&self, env: Environment<'_>) -> Element;

    /// A name for tracing and debugging.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl<F> Component for F
where
    F: Fn(Environment<'_>) -> Element,
{
    fn body(&self, env: Environment<'_>) -> Element {
        self(env)
    }
}

/// A node of a unit tree.
pub enum Element {
    /// Renders nothing.
    Empty,
    /// A text leaf.
    Text(String),
    /// Children composed side by side, all under the same environment.
    Stack(Vec<Self>),
    /// A composition edge carrying overrides for everything below it.
    Scoped {
        /// Bindings applied to the parent snapshot, in order.
        overrides: Overrides,
        /// The subtree that sees the derived snapshot.
        child: Box<Self>,
    },
    /// A unit that reads the environment to build its body.
    Component(Box<dyn Component>),
}

impl Element {
    /// Creates a text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a stack of children.
    #[must_use]
    pub fn stack(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Stack(children.into_iter().collect())
    }

    /// Wraps a component.
    #[must_use]
    pub fn component(component: impl Component + 'static) -> Self {
        Self::Component(Box::new(component))
    }

    /// Wraps a closure that builds content from the environment in effect.
    #[must_use]
    pub fn from_fn<F>(build: F) -> Self
    where
        F: Fn(Environment<'_>) -> Self + 'static,
    {
        Self::component(build)
    }

    /// Binds `K` to `value` for this element and everything below it.
    ///
    /// Each call wraps the element in a new composition edge, so an override
    /// already inside the element stays nearer its readers and shadows this
    /// one. Use [`Element::scoped`] to put several bindings on one edge.
    #[must_use]
    pub fn environment<K: EnvironmentKey>(self, value: K::Value) -> Self {
        self.scoped(Overrides::new().set::<K>(value))
    }

    /// Wraps this element in a composition edge carrying `overrides`.
    ///
    /// The bindings are applied in order, so the last binding for a key wins.
    #[must_use]
    pub fn scoped(self, overrides: Overrides) -> Self {
        Self::Scoped {
            overrides,
            child: Box::new(self),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Stack(children) => f.debug_tuple("Stack").field(children).finish(),
            Self::Scoped { overrides, child } => f
                .debug_struct("Scoped")
                .field("overrides", overrides)
                .field("child", child)
                .finish(),
            Self::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}

/// The output of a render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Nothing was produced.
    Empty,
    /// A text leaf.
    Text(String),
    /// The output of a stack, in order.
    Group(Vec<Self>),
}

impl Rendered {
    /// Returns every text leaf in document order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Empty => {}
            Self::Text(text) => out.push(text),
            Self::Group(children) => {
                for child in children {
                    child.collect_texts(out);
                }
            }
        }
    }
}

/// Renders `root` with `env` as the root snapshot.
#[must_use]
pub fn render(root: &Element, env: &EnvironmentValues) -> Rendered {
    render_with_trace(root, env, &mut NoTrace)
}

/// Renders `root` with `env` as the root snapshot, reporting to `trace`.
pub fn render_with_trace<T: RenderTrace + ?Sized>(
    root: &Element,
    env: &EnvironmentValues,
    trace: &mut T,
) -> Rendered {
    render_node(root, env, 0, trace)
}

fn render_node<T: RenderTrace + ?Sized>(
    element: &Element,
    env: &EnvironmentValues,
    depth: usize,
    trace: &mut T,
) -> Rendered {
    match element {
        Element::Empty => Rendered::Empty,
        Element::Text(text) => Rendered::Text(text.clone()),
        Element::Stack(children) => Rendered::Group(
            children
                .iter()
                .map(|child| render_node(child, env, depth + 1, &mut *trace))
                .collect(),
        ),
        Element::Scoped { overrides, child } => {
            if overrides.is_empty() {
                return render_node(child, env, depth, trace);
            }
            let derived = overrides.apply(env);
            trace.scope(depth, env, overrides, &derived);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                depth,
                parent = %env.id(),
                derived = %derived.id(),
                overrides = overrides.len(),
                "derived environment scope"
            );
            render_node(child, &derived, depth, trace)
        }
        Element::Component(component) => {
            let name = component.name();
            trace.component(depth, name, env.id());
            #[cfg(feature = "tracing")]
            tracing::trace!(depth, component = name, snapshot = %env.id(), "building component");
            let body = component.body(Environment::new(env));
            render_node(&body, env, depth + 1, trace)
        }
    }
}
