//! Group filtering for displayed nodes.
//!
//! The selector widget offers "Show All" plus one entry per project group.
//! The visibility predicate takes the selected filter and the payload
//! explicitly each time it runs; there is no captured widget state.

use crate::graph::{GanttPayload, GraphNode};
use crate::record::GroupOption;
use serde::{Deserialize, Serialize};

/// Selector value meaning "no group filtering".
pub const SHOW_ALL_VALUE: &str = "All";

/// Selected group filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupFilter {
    All,
    Group(String),
}

impl GroupFilter {
    /// Build from a selector value, mapping the "Show All" sentinel to `All`.
    pub fn from_value(value: &str) -> Self {
        if value == SHOW_ALL_VALUE {
            GroupFilter::All
        } else {
            GroupFilter::Group(value.to_string())
        }
    }
}

/// Whether a node is shown under the given filter.
///
/// A node is visible when no group is selected, when its own group tag
/// matches, or when its direct parent's group tag matches (a task directly
/// under a project of the selected group). Tasks nested under other tasks
/// are hidden with the rest, since their parent carries no group tag.
pub fn node_visible(payload: &GanttPayload, node: &GraphNode, filter: &GroupFilter) -> bool {
    let selected = match filter {
        GroupFilter::All => return true,
        GroupFilter::Group(name) => name.as_str(),
    };

    if node.project_group.as_deref() == Some(selected) {
        return true;
    }

    node.parent
        .as_deref()
        .and_then(|p| payload.get(p))
        .map(|parent| parent.project_group.as_deref() == Some(selected))
        .unwrap_or(false)
}

/// Assemble the selector options: "Show All" first, then the fetched groups.
pub fn selector_options(group_names: &[String]) -> Vec<GroupOption> {
    let mut options = vec![GroupOption {
        label: "Show All".to_string(),
        value: SHOW_ALL_VALUE.to_string(),
    }];
    options.extend(group_names.iter().map(|name| GroupOption {
        label: name.clone(),
        value: name.clone(),
    }));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn payload() -> GanttPayload {
        let project = |id: &str, group: &str| GraphNode {
            id: id.to_string(),
            text: id.to_string(),
            start_date: None,
            end_date: None,
            parent: None,
            project_group: Some(group.to_string()),
            color: None,
            kind: NodeKind::Project,
        };
        let task = |id: &str, parent: &str| GraphNode {
            id: id.to_string(),
            text: id.to_string(),
            start_date: None,
            end_date: None,
            parent: Some(parent.to_string()),
            project_group: None,
            color: None,
            kind: NodeKind::Task,
        };
        GanttPayload {
            data: vec![
                project("p1", "Delivery"),
                project("p2", "Research"),
                task("t1", "p1"),
                task("t2", "t1"),
            ],
            links: vec![],
        }
    }

    #[test]
    fn test_show_all_shows_everything() {
        let payload = payload();
        let filter = GroupFilter::All;
        assert!(payload
            .data
            .iter()
            .all(|n| node_visible(&payload, n, &filter)));
    }

    #[test]
    fn test_group_filter_shows_project_and_direct_children() {
        let payload = payload();
        let filter = GroupFilter::Group("Delivery".to_string());

        let visible: Vec<&str> = payload
            .data
            .iter()
            .filter(|n| node_visible(&payload, n, &filter))
            .map(|n| n.id.as_str())
            .collect();

        // p1 matches by tag, t1 by its parent's tag; p2 is another group and
        // t2's parent is a task with no tag.
        assert_eq!(visible, vec!["p1", "t1"]);
    }

    #[test]
    fn test_filter_from_value() {
        assert_eq!(GroupFilter::from_value("All"), GroupFilter::All);
        assert_eq!(
            GroupFilter::from_value("Delivery"),
            GroupFilter::Group("Delivery".to_string())
        );
    }

    #[test]
    fn test_selector_options_prepend_show_all() {
        let options = selector_options(&["Delivery".to_string(), "Research".to_string()]);
        assert_eq!(options[0].label, "Show All");
        assert_eq!(options[0].value, "All");
        assert_eq!(options[1].label, "Delivery");
        assert_eq!(options[2].value, "Research");
    }
}
