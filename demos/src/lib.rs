// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment-values sample screen.
//!
//! A custom key is injected two stacks above the view that reads it, while a
//! sibling outside that stack keeps seeing the default. An optional header
//! reads the built-in layout direction.

use tracing_subscriber::EnvFilter;
use understory_environment::{
    Component, Element, Environment, LayoutDirection, Reader, environment_key,
};

environment_key! {
    /// A custom integer axis, 0 unless an ancestor overrides it.
    pub MyEnvironmentKey: i32 = 0;
}

/// Shows the value of [`MyEnvironmentKey`] in effect.
#[derive(Debug, Default)]
pub struct MySubView {
    my_value: Reader<MyEnvironmentKey>,
}

impl Component for MySubView {
    fn body(&self, env: Environment<'_>) -> Element {
        let value = self.my_value.resolve(env);
        tracing::debug!(value, "MySubView resolved MyEnvironmentKey");
        Element::text(value.to_string())
    }

    fn name(&self) -> &'static str {
        "MySubView"
    }
}

/// Shows a different label for each layout direction.
#[derive(Debug, Default)]
pub struct DirectionHeader;

impl Component for DirectionHeader {
    fn body(&self, env: Environment<'_>) -> Element {
        match env.layout_direction() {
            LayoutDirection::LeftToRight => Element::text("Left to Right"),
            LayoutDirection::RightToLeft => Element::text("Right to Left"),
        }
    }

    fn name(&self) -> &'static str {
        "DirectionHeader"
    }
}

/// Options for building the sample screen.
#[derive(Clone, Copy, Debug)]
pub struct ContentOptions {
    /// The value injected above [`MySubView`].
    pub value: i32,
    /// Whether to show [`DirectionHeader`] at the top.
    pub show_direction: bool,
    /// Whether to add a sibling [`MySubView`] outside the overridden stack.
    pub show_sibling: bool,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            value: 7,
            show_direction: false,
            show_sibling: false,
        }
    }
}

/// Builds the sample screen.
#[must_use]
pub fn content_view(options: ContentOptions) -> Element {
    let mut children = Vec::new();
    if options.show_direction {
        children.push(Element::component(DirectionHeader));
    }
    children.push(Element::stack([
        Element::component(MySubView::default()).environment::<MyEnvironmentKey>(options.value),
    ]));
    if options.show_sibling {
        children.push(Element::component(MySubView::default()));
    }
    Element::stack(children)
}

/// Initializes logging.
///
/// `RUST_LOG` overrides the default filter, which is `info` for the demo and
/// `warn` for everything else.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,understory_demos=debug,understory_environment=trace"
    } else {
        "warn,understory_demos=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_environment::{EnvironmentValues, LayoutDirectionKey, render};

    #[test]
    fn default_screen_shows_injected_value() {
        let rendered = render(
            &content_view(ContentOptions::default()),
            &EnvironmentValues::new(),
        );
        assert_eq!(rendered.texts(), ["7"]);
    }

    #[test]
    fn sibling_sees_default() {
        let options = ContentOptions {
            value: 3,
            show_sibling: true,
            ..ContentOptions::default()
        };
        let rendered = render(&content_view(options), &EnvironmentValues::new());
        assert_eq!(rendered.texts(), ["3", "0"]);
    }

    #[test]
    fn header_follows_root_direction() {
        let options = ContentOptions {
            show_direction: true,
            ..ContentOptions::default()
        };
        let root = EnvironmentValues::new()
            .with_override::<LayoutDirectionKey>(LayoutDirection::RightToLeft);
        let rendered = render(&content_view(options), &root);
        assert_eq!(rendered.texts(), ["Right to Left", "7"]);
    }
}
