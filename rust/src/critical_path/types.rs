//! Types for critical path scheduling.

use thiserror::Error;

use crate::models::{Task, MAX_DURATION_DAYS};

/// Fatal errors of a scheduling run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The dependency graph contains a cycle. Holds the task names along the
    /// cycle, each one a dependency of the next; the last depends on the
    /// first.
    #[error("Circular dependency detected: {}", format_cycle(.0))]
    CircularDependency(Vec<String>),
}

fn format_cycle(names: &[String]) -> String {
    match names.first() {
        Some(first) => format!("{} -> {}", names.join(" -> "), first),
        None => String::new(),
    }
}

/// Recoverable problems found while scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleWarning {
    #[error("task {task:?} depends on unknown task {reference:?}; treated as satisfied")]
    UnresolvedDependency { task: String, reference: String },
    #[error("task {task:?} has invalid duration {duration}; using 1 day")]
    InvalidDuration { task: String, duration: i64 },
    #[error("task {task:?} duration {duration} exceeds {max} days; capped", max = MAX_DURATION_DAYS)]
    DurationCapped { task: String, duration: i64 },
}

/// Result of a scheduling run.
#[derive(Clone, Debug, Default)]
pub struct ScheduleOutcome {
    /// Input tasks, in input order, annotated with their timing.
    pub tasks: Vec<Task>,
    /// Project duration D = max(early_finish) in days.
    pub project_duration: i64,
    /// Ids of zero-float tasks, in topological order.
    pub critical_path: Vec<String>,
    pub warnings: Vec<ScheduleWarning>,
}
