//! Graph Normalizer — raw records to uniform timeline nodes.
//!
//! Maps the flat project/task/link records onto the engine's node shape.
//! Tasks without an explicit parent hang off their owning project. The only
//! validation performed is the parent check: a task whose parent resolves to
//! nothing in the fetched set fails loudly rather than rendering an
//! inconsistent graph.

use crate::error::{ErrorCode, GanttError, Result};
use crate::graph::{GraphNode, NodeKind, NormalizedLink};
use crate::record::{RawLink, RawProject, RawTask};
use std::collections::HashSet;

/// Map raw projects to project nodes.
///
/// Group tag and colour come from the related group when present; an
/// ungrouped project gets an empty tag and no colour.
pub fn normalize_projects(projects: &[RawProject]) -> Vec<GraphNode> {
    projects
        .iter()
        .map(|p| {
            let group_name = p
                .group
                .as_ref()
                .map(|g| g.name.clone())
                .unwrap_or_default();
            let color = p
                .group
                .as_ref()
                .and_then(|g| g.color.clone())
                .filter(|c| !c.is_empty());
            GraphNode {
                id: p.id.clone(),
                text: p.name.clone(),
                start_date: p.start_date,
                end_date: p.due_date,
                parent: None,
                project_group: Some(group_name),
                color,
                kind: NodeKind::Project,
            }
        })
        .collect()
}

/// Map raw tasks to task nodes. Parent is the explicit parent task when set,
/// otherwise the owning project.
pub fn normalize_tasks(tasks: &[RawTask]) -> Vec<GraphNode> {
    tasks
        .iter()
        .map(|t| GraphNode {
            id: t.id.clone(),
            text: t.name.clone(),
            start_date: Some(t.start_date),
            end_date: Some(t.current_due_date),
            parent: Some(t.parent.clone().unwrap_or_else(|| t.project.clone())),
            project_group: None,
            color: None,
            kind: NodeKind::Task,
        })
        .collect()
}

/// Map raw links 1:1 into the engine's link shape.
pub fn normalize_links(links: &[RawLink]) -> Vec<NormalizedLink> {
    links
        .iter()
        .map(|l| NormalizedLink {
            id: l.id.clone(),
            source: l.source.clone(),
            target: l.target.clone(),
            link_type: l.link_type.clone(),
        })
        .collect()
}

/// Check that every task parent resolves to a fetched project or task.
///
/// Runs on the normalized nodes before milestone synthesis (synthetic
/// milestones always parent to a real project and need no check).
pub fn validate_parents(projects: &[GraphNode], tasks: &[GraphNode]) -> Result<()> {
    let known: HashSet<&str> = projects
        .iter()
        .chain(tasks.iter())
        .map(|n| n.id.as_str())
        .collect();

    for task in tasks {
        if let Some(parent) = task.parent.as_deref() {
            if !known.contains(parent) {
                return Err(GanttError::new(
                    ErrorCode::DanglingParentReference,
                    format!("task {} references missing parent {}", task.id, parent),
                )
                .with_context(serde_json::json!({
                    "task": task.id,
                    "parent": parent,
                })));
            }
        }
    }
    Ok(())
}
