//! Gantt Bridge — schedule-graph pipeline and record sync.
//!
//! Transforms a flat set of project/task/link records into the normalized
//! graph a Gantt timeline engine parses, synthesizes the derived visuals the
//! raw records lack (start/end milestones for taskless projects, inherited
//! task colours), and mediates engine edits back to the remote record store
//! with temporary-to-permanent id reconciliation.
//!
//! The timeline engine and the record store are external collaborators and
//! appear only as traits: [`pipeline::TimelineRenderer`],
//! [`source::ScheduleSource`] and [`sync::RecordStore`].

pub mod color;
pub mod error;
pub mod filter;
pub mod graph;
pub mod milestone;
pub mod normalize;
pub mod pipeline;
pub mod propagate;
pub mod record;
pub mod source;
pub mod sync;
