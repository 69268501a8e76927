//! Raw record shapes as fetched from the remote store.
//!
//! These mirror the wire payload of the schedule query: a flat set of
//! projects, tasks and dependency links joined by foreign keys. Normalization
//! into the timeline graph happens downstream; nothing here is validated
//! beyond deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Group a project belongs to, if any. Carries the colour the group's
/// tasks inherit on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A project record. Dates are nominal and may be absent; a project with no
/// tasks and no dates simply renders as an empty row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub group: Option<ProjectGroup>,
}

/// A task record. `parent` is an explicit parent-task reference; when absent
/// the task hangs directly off its owning project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub current_due_date: NaiveDate,
    #[serde(default)]
    pub parent: Option<String>,
    pub project: String,
}

/// A dependency link between two schedule nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLink {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

/// Full result of the schedule query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub projects: Vec<RawProject>,
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// Label/value pair for the group selector widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOption {
    pub label: String,
    pub value: String,
}
