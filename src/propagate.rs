//! Colour Propagator — push project colours onto direct children.
//!
//! Tasks (and synthetic milestones) parented directly to a coloured project
//! take a lightened variant of that project's colour. Tasks nested under
//! other tasks are left alone; the engine renders them in its default
//! palette. Last write wins when parent ids coincide across projects.

use crate::color::derive_color;
use crate::error::Result;
use crate::graph::GraphNode;

/// Amount added to each colour channel when lightening a project colour
/// for its children.
pub const LIGHTEN_AMOUNT: i32 = 50;

/// Colour every node whose parent is a coloured project.
///
/// Fails if a project carries a malformed colour; the error names the value
/// so the offending group record can be fixed.
pub fn propagate_colors(projects: &[GraphNode], tasks: &mut [GraphNode]) -> Result<()> {
    for project in projects {
        let Some(color) = project.color.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let derived = derive_color(color, LIGHTEN_AMOUNT)?;
        for task in tasks.iter_mut() {
            if task.parent.as_deref() == Some(project.id.as_str()) {
                task.color = Some(derived.clone());
            }
        }
    }
    Ok(())
}
