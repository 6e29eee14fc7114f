// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the environment-values sample screen and prints each text leaf.
//!
//! Run:
//! - `cargo run -p understory_demos -- --value 7 --sibling`
//! - `cargo run -p understory_demos -- --direction rtl --trace`

use clap::Parser;
use understory_demos::{ContentOptions, content_view, init_logging};
use understory_environment::{
    EnvironmentValues, LayoutDirection, LayoutDirectionKey, RenderEvent, RenderRecorder,
    render_with_trace,
};

#[derive(Parser, Debug)]
#[command(name = "environment_values")]
#[command(about = "Render a view tree that injects an environment value into a subtree")]
struct Cli {
    /// Value injected above `MySubView`
    #[arg(long, default_value_t = 7, allow_negative_numbers = true)]
    value: i32,

    /// Root layout direction (`ltr` or `rtl`); also shows the direction header
    #[arg(long)]
    direction: Option<LayoutDirection>,

    /// Add a sibling `MySubView` outside the overridden subtree
    #[arg(long)]
    sibling: bool,

    /// Print every scope derivation and component build
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.trace);

    let options = ContentOptions {
        value: cli.value,
        show_direction: cli.direction.is_some(),
        show_sibling: cli.sibling,
    };

    let mut root = EnvironmentValues::new();
    if let Some(direction) = cli.direction {
        root = root.with_override::<LayoutDirectionKey>(direction);
    }
    tracing::info!(snapshot = %root.id(), "rendering content view");

    let mut recorder = RenderRecorder::new();
    let rendered = render_with_trace(&content_view(options), &root, &mut recorder);

    if cli.trace {
        for event in recorder.events() {
            match event {
                RenderEvent::Scope {
                    depth,
                    parent,
                    derived,
                    keys,
                } => {
                    let names: Vec<_> = keys.iter().map(|key| key.name()).collect();
                    let indent = depth * 2;
                    println!("{:indent$}scope {parent} -> {derived} {names:?}", "");
                }
                RenderEvent::Component {
                    depth,
                    name,
                    snapshot,
                } => {
                    println!("{:indent$}{name} reads {snapshot}", "", indent = depth * 2);
                }
            }
        }
    }

    for text in rendered.texts() {
        println!("{text}");
    }
}
