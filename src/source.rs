//! Inbound data fetch seam.
//!
//! The pipeline pulls its raw records through `ScheduleSource`, which stands
//! in for whatever query layer the deployment uses. `SnapshotFileSource`
//! reads a JSON snapshot from disk, which is what the CLI and tests run
//! against.

use crate::error::{ErrorCode, GanttError, Result};
use crate::record::ScheduleSnapshot;
use async_trait::async_trait;
use std::path::PathBuf;

/// Query operations the pipeline needs from the record store.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the full raw record snapshot (projects, tasks, links).
    async fn fetch_schedule(&self) -> Result<ScheduleSnapshot>;

    /// Fetch the available project-group names for the selector widget.
    async fn fetch_group_names(&self) -> Result<Vec<String>>;
}

/// Schedule source backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_snapshot(&self) -> Result<ScheduleSnapshot> {
        if !self.path.exists() {
            return Err(GanttError::new(
                ErrorCode::SnapshotNotFound,
                format!("snapshot not found: {}", self.path.display()),
            ));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}

#[async_trait]
impl ScheduleSource for SnapshotFileSource {
    async fn fetch_schedule(&self) -> Result<ScheduleSnapshot> {
        self.read_snapshot()
    }

    /// Group names are the distinct groups of the snapshot's projects, in
    /// first-appearance order.
    async fn fetch_group_names(&self) -> Result<Vec<String>> {
        let snapshot = self.read_snapshot()?;
        Ok(distinct_group_names(&snapshot))
    }
}

fn distinct_group_names(snapshot: &ScheduleSnapshot) -> Vec<String> {
    let mut names = Vec::new();
    for project in &snapshot.projects {
        if let Some(group) = &project.group {
            if !group.name.is_empty() && !names.contains(&group.name) {
                names.push(group.name.clone());
            }
        }
    }
    names
}
