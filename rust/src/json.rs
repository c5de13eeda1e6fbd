//! JSON entry point for consumers outside Python (Gantt renderer, PDF export).

use thiserror::Error;

use crate::critical_path::{schedule, SchedulingError};
use crate::models::Task;

/// Errors from [`optimize_schedule_json`].
#[derive(Error, Debug)]
pub enum ScheduleJsonError {
    #[error("invalid task JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

/// Schedule a JSON array of tasks and return the annotated array as JSON.
pub fn optimize_schedule_json(tasks_json: &str) -> Result<String, ScheduleJsonError> {
    let tasks: Vec<Task> = serde_json::from_str(tasks_json)?;
    let scheduled = schedule(&tasks)?;
    Ok(serde_json::to_string(&scheduled)?)
}
