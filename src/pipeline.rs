//! Full-refresh pipeline: raw snapshot to rendered timeline.
//!
//! One entry point serves both the initial load and every manual refresh.
//! The payload is rebuilt in full from the latest snapshot (no incremental
//! diffing) and handed to the renderer only once complete, so the engine
//! never observes a partially transformed graph. A fetch or transform error
//! leaves whatever the renderer currently shows untouched.

use crate::error::Result;
use crate::filter::selector_options;
use crate::graph::GanttPayload;
use crate::milestone::synthesize_milestones;
use crate::normalize::{normalize_links, normalize_projects, normalize_tasks, validate_parents};
use crate::propagate::propagate_colors;
use crate::record::{GroupOption, ScheduleSnapshot};
use crate::source::ScheduleSource;

/// Destination for a completed payload. The engine's parse/load operation,
/// injected wherever a refresh can happen.
pub trait TimelineRenderer: Send {
    /// Replace the displayed graph with a fully built payload.
    fn load(&mut self, payload: GanttPayload);
}

/// Transform a raw snapshot into the engine payload.
///
/// Normalize, validate parents, synthesize milestones for taskless projects,
/// then propagate project colours (synthetic milestones inherit too, since
/// they parent directly to their project). Projects precede tasks in the
/// output, matching the order the engine expects for tree construction.
pub fn build_payload(snapshot: &ScheduleSnapshot) -> Result<GanttPayload> {
    let projects = normalize_projects(&snapshot.projects);
    let mut tasks = normalize_tasks(&snapshot.tasks);

    validate_parents(&projects, &tasks)?;
    synthesize_milestones(&projects, &mut tasks);
    propagate_colors(&projects, &mut tasks)?;

    let mut data = projects;
    data.extend(tasks);
    Ok(GanttPayload {
        data,
        links: normalize_links(&snapshot.links),
    })
}

/// Fetch the latest snapshot and atomically replace the rendered graph.
///
/// Callers must await completion before issuing another refresh against the
/// same renderer; there is no interleaving of two in-progress refreshes.
pub async fn refresh<S, R>(source: &S, renderer: &mut R) -> Result<()>
where
    S: ScheduleSource + ?Sized,
    R: TimelineRenderer,
{
    let snapshot = source.fetch_schedule().await?;
    let payload = build_payload(&snapshot)?;
    renderer.load(payload);
    Ok(())
}

/// Fetch the group names and assemble selector options ("Show All" first).
pub async fn group_options<S>(source: &S) -> Result<Vec<GroupOption>>
where
    S: ScheduleSource + ?Sized,
{
    let names = source.fetch_group_names().await?;
    Ok(selector_options(&names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::derive_color;
    use crate::error::{ErrorCode, GanttError};
    use crate::graph::NodeKind;
    use crate::propagate::LIGHTEN_AMOUNT;
    use crate::record::{ProjectGroup, RawLink, RawProject, RawTask};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Snapshot from the end-to-end scenario: coloured taskless project P,
    /// uncoloured project Q with one child task T, one link.
    fn scenario_snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot {
            projects: vec![
                RawProject {
                    id: "P".to_string(),
                    name: "Project P".to_string(),
                    start_date: Some(date(2024, 1, 1)),
                    due_date: Some(date(2024, 1, 31)),
                    group: Some(ProjectGroup {
                        name: "Delivery".to_string(),
                        color: Some("#3366CC".to_string()),
                    }),
                },
                RawProject {
                    id: "Q".to_string(),
                    name: "Project Q".to_string(),
                    start_date: Some(date(2024, 2, 1)),
                    due_date: Some(date(2024, 2, 28)),
                    group: None,
                },
            ],
            tasks: vec![RawTask {
                id: "T".to_string(),
                name: "Task T".to_string(),
                start_date: date(2024, 2, 2),
                current_due_date: date(2024, 2, 10),
                parent: None,
                project: "Q".to_string(),
            }],
            links: vec![RawLink {
                id: "L".to_string(),
                source: "T".to_string(),
                target: "P_start_task".to_string(),
                link_type: "0".to_string(),
            }],
        }
    }

    struct RecordingRenderer {
        loads: Vec<GanttPayload>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self { loads: Vec::new() }
        }
    }

    impl TimelineRenderer for RecordingRenderer {
        fn load(&mut self, payload: GanttPayload) {
            self.loads.push(payload);
        }
    }

    struct FixedSource(ScheduleSnapshot);

    #[async_trait]
    impl ScheduleSource for FixedSource {
        async fn fetch_schedule(&self) -> crate::error::Result<ScheduleSnapshot> {
            Ok(self.0.clone())
        }

        async fn fetch_group_names(&self) -> crate::error::Result<Vec<String>> {
            Ok(vec!["Delivery".to_string()])
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ScheduleSource for FailingSource {
        async fn fetch_schedule(&self) -> crate::error::Result<ScheduleSnapshot> {
            Err(GanttError::new(ErrorCode::FetchFailed, "query rejected"))
        }

        async fn fetch_group_names(&self) -> crate::error::Result<Vec<String>> {
            Err(GanttError::new(ErrorCode::FetchFailed, "query rejected"))
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let payload = build_payload(&scenario_snapshot()).unwrap();

        // P gets its two synthetic milestones, coloured with P's lightened
        // group colour because they parent directly to P.
        let start = payload.get("P_start_task").unwrap();
        assert_eq!(start.kind, NodeKind::Milestone);
        assert_eq!(start.parent.as_deref(), Some("P"));
        assert_eq!(start.start_date, Some(date(2024, 1, 1)));
        assert_eq!(start.end_date, Some(date(2024, 1, 1)));

        let end = payload.get("P_end_task").unwrap();
        assert_eq!(end.start_date, Some(date(2024, 1, 31)));

        let expected = derive_color("#3366CC", LIGHTEN_AMOUNT).unwrap();
        assert_eq!(start.color.as_deref(), Some(expected.as_str()));

        // Q has a task, so no milestones, and T stays uncoloured.
        assert!(payload.get("Q_start_task").is_none());
        assert!(payload.get("Q_end_task").is_none());
        let t = payload.get("T").unwrap();
        assert_eq!(t.color, None);
        assert_eq!(t.parent.as_deref(), Some("Q"));

        // Projects precede tasks; the link maps 1:1.
        assert_eq!(payload.data[0].id, "P");
        assert_eq!(payload.data[1].id, "Q");
        assert_eq!(payload.links.len(), 1);
        assert_eq!(payload.links[0].target, "P_start_task");
    }

    #[test]
    fn test_build_is_idempotent_over_fresh_input() {
        let snapshot = scenario_snapshot();
        let first = build_payload(&snapshot).unwrap();
        let second = build_payload(&snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dangling_parent_aborts_build() {
        let mut snapshot = scenario_snapshot();
        snapshot.tasks[0].parent = Some("ghost".to_string());
        let err = build_payload(&snapshot).unwrap_err();
        assert_eq!(err.code, ErrorCode::DanglingParentReference as u16);
    }

    #[tokio::test]
    async fn test_refresh_loads_renderer_exactly_once() {
        let source = FixedSource(scenario_snapshot());
        let mut renderer = RecordingRenderer::new();

        refresh(&source, &mut renderer).await.unwrap();
        assert_eq!(renderer.loads.len(), 1);

        refresh(&source, &mut renderer).await.unwrap();
        assert_eq!(renderer.loads.len(), 2);
        assert_eq!(renderer.loads[0], renderer.loads[1]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_renderer_untouched() {
        let mut renderer = RecordingRenderer::new();
        let err = refresh(&FailingSource, &mut renderer).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed as u16);
        assert!(err.recoverable);
        assert!(renderer.loads.is_empty());
    }

    #[tokio::test]
    async fn test_group_options_prepend_show_all() {
        let source = FixedSource(scenario_snapshot());
        let options = group_options(&source).await.unwrap();
        assert_eq!(options[0].value, "All");
        assert_eq!(options[1].label, "Delivery");
    }
}
