//! Milestone Synthesizer — start/end markers for taskless projects.
//!
//! A project with no tasks renders as an empty row, so the pipeline injects a
//! pair of zero-length milestone children spanning its nominal dates. The ids
//! are derived from the project id with fixed suffixes, which keeps them
//! unique against real record ids and stable across refreshes.

use crate::graph::{GraphNode, NodeKind};
use std::collections::HashSet;

/// Suffix appended to a project id for its synthetic start milestone.
pub const START_SUFFIX: &str = "_start_task";
/// Suffix appended to a project id for its synthetic end milestone.
pub const END_SUFFIX: &str = "_end_task";

/// Append start/end milestones for every project no task points at.
///
/// A project missing either date is skipped silently. For each synthesized
/// project the start milestone precedes the end milestone; projects are
/// visited in input order.
pub fn synthesize_milestones(projects: &[GraphNode], tasks: &mut Vec<GraphNode>) {
    let referenced: HashSet<&str> = tasks
        .iter()
        .filter_map(|t| t.parent.as_deref())
        .collect();

    let mut synthesized = Vec::new();
    for project in projects {
        if referenced.contains(project.id.as_str()) {
            continue;
        }
        let (Some(start), Some(end)) = (project.start_date, project.end_date) else {
            continue;
        };

        synthesized.push(milestone(
            format!("{}{}", project.id, START_SUFFIX),
            "Project Start",
            start,
            &project.id,
        ));
        synthesized.push(milestone(
            format!("{}{}", project.id, END_SUFFIX),
            "Project End",
            end,
            &project.id,
        ));
    }
    tasks.extend(synthesized);
}

fn milestone(id: String, text: &str, date: chrono::NaiveDate, parent: &str) -> GraphNode {
    GraphNode {
        id,
        text: text.to_string(),
        start_date: Some(date),
        end_date: Some(date),
        parent: Some(parent.to_string()),
        project_group: None,
        color: None,
        kind: NodeKind::Milestone,
    }
}
