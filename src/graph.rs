//! Normalized schedule graph handed to the timeline engine.
//!
//! Field names here are the engine's wire contract (`text`, `start_date`,
//! `parent`, `type`), not ours; the engine parses this payload directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Variant of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Project,
    Task,
    Milestone,
}

/// A unit in the normalized schedule graph.
///
/// Projects carry a `project_group` tag (empty string when ungrouped); tasks
/// and milestones carry a `parent` that resolves to another node in the same
/// graph. Milestones are zero-length: start equals end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// A dependency link in the engine's shape, mapped 1:1 from a raw link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLink {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

/// Complete payload for the engine's parse/load operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanttPayload {
    pub data: Vec<GraphNode>,
    pub links: Vec<NormalizedLink>,
}

impl GanttPayload {
    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.data.iter().find(|n| n.id == id)
    }
}
