//! Gantt Bridge CLI.
//!
//! Runs the schedule pipeline against a JSON snapshot file and prints what
//! the timeline engine would be handed, which makes the transform inspectable
//! without an engine attached. Errors print as structured JSON on stderr.

use clap::{Parser, Subcommand};
use gantt_bridge::error::Result;
use gantt_bridge::filter::{node_visible, GroupFilter};
use gantt_bridge::graph::GanttPayload;
use gantt_bridge::pipeline::{self, TimelineRenderer};
use gantt_bridge::source::SnapshotFileSource;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gantt-bridge", about = "Schedule-graph pipeline for Gantt timelines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and print the normalized engine payload from a snapshot file
    Render {
        /// Path to the schedule snapshot JSON
        snapshot: PathBuf,
        /// Only show nodes of this project group (selector semantics)
        #[arg(long)]
        group: Option<String>,
    },
    /// Print the group selector options for a snapshot file
    Groups {
        /// Path to the schedule snapshot JSON
        snapshot: PathBuf,
    },
}

/// Renderer that keeps the loaded payload for printing.
struct CaptureRenderer {
    payload: Option<GanttPayload>,
}

impl TimelineRenderer for CaptureRenderer {
    fn load(&mut self, payload: GanttPayload) {
        self.payload = Some(payload);
    }
}

/// Drop nodes hidden under the selected group, the way the engine's display
/// filter would.
fn apply_group_filter(payload: GanttPayload, filter: &GroupFilter) -> GanttPayload {
    let visible: Vec<bool> = payload
        .data
        .iter()
        .map(|n| node_visible(&payload, n, filter))
        .collect();
    let data = payload
        .data
        .into_iter()
        .zip(visible)
        .filter_map(|(node, keep)| keep.then_some(node))
        .collect();
    GanttPayload {
        data,
        links: payload.links,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render { snapshot, group } => {
            let source = SnapshotFileSource::new(snapshot);
            let mut renderer = CaptureRenderer { payload: None };
            pipeline::refresh(&source, &mut renderer).await?;

            let mut payload = renderer.payload.unwrap_or_default();
            if let Some(group) = group {
                payload = apply_group_filter(payload, &GroupFilter::from_value(&group));
            }
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Groups { snapshot } => {
            let source = SnapshotFileSource::new(snapshot);
            let options = pipeline::group_options(&source).await?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", err.to_json());
        std::process::exit(1);
    }
}
