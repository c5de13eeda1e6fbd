//! Critical Path Method scheduling.
//!
//! Tasks are placed in an arena, dependency references resolved once, and
//! the graph ordered with Kahn's algorithm; an incomplete ordering is the
//! cycle check. The forward pass then runs in topological order and the
//! backward pass in reverse, both iteratively, so termination is bounded by
//! O(n + e) regardless of graph shape.

mod calculation;
mod graph;
mod types;

pub use calculation::{schedule, schedule_with_summary};
pub use graph::TaskGraph;
pub use types::{ScheduleOutcome, ScheduleWarning, SchedulingError};
