//! Construction process scheduler for landscaping projects.
//!
//! Turns priced estimate line items into an ordered project schedule:
//!
//! 1. [`generator`] converts work items into draft tasks
//! 2. [`dependencies`] infers precedence between work categories
//! 3. [`critical_path`] computes CPM timing and the critical path
//! 4. [`progress`] aggregates live progress into a health report
//!
//! Every step is a pure, synchronous transformation over in-memory records.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{Local, NaiveDate};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod arena;
mod config;
pub mod critical_path;
pub mod dependencies;
pub mod generator;
mod json;
pub mod logging;
mod models;
pub mod progress;

pub use config::{ConfigError, ScheduleConfig, DEFAULT_AMOUNT_PER_DAY};
pub use critical_path::{ScheduleOutcome, ScheduleWarning, SchedulingError};
pub use generator::{GenerationOutcome, GenerationWarning};
pub use json::{optimize_schedule_json, ScheduleJsonError};
pub use models::{Category, ProgressReport, Task, TaskTiming, WorkItem, MAX_DURATION_DAYS};

/// Convert estimate work items into draft tasks.
///
/// Invalid items (empty name, negative or non-numeric amount) are skipped
/// with a warning. Tasks are chained sequentially from `project_start`.
pub fn generate_processes_from_estimate(items: &[WorkItem], project_start: NaiveDate) -> Vec<Task> {
    generator::generate(items, project_start)
}

/// Populate each task's dependencies from the category stage order.
pub fn set_automatic_dependencies(tasks: &[Task]) -> Vec<Task> {
    dependencies::resolve_dependencies(tasks)
}

/// Annotate tasks with CPM timing.
///
/// # Errors
/// * `SchedulingError::CircularDependency` if the dependencies form a cycle
pub fn optimize_schedule(tasks: &[Task]) -> Result<Vec<Task>, SchedulingError> {
    critical_path::schedule(tasks)
}

/// Aggregate the progress of `tasks` as of `today`.
pub fn generate_progress_report(tasks: &[Task], today: NaiveDate) -> ProgressReport {
    progress::report(tasks, today)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Generate draft tasks from estimate work items.
///
/// # Arguments
/// * `items` - List of WorkItem
/// * `project_start` - Date of the first task (defaults to today)
/// * `config` - ScheduleConfig (defaults to ScheduleConfig())
///
/// # Raises
/// * ValueError if the config is invalid
#[pyfunction]
#[pyo3(name = "generate_processes_from_estimate", signature = (items, project_start=None, config=None))]
fn py_generate_processes_from_estimate(
    items: Vec<WorkItem>,
    project_start: Option<NaiveDate>,
    config: Option<ScheduleConfig>,
) -> PyResult<Vec<Task>> {
    let config = config.unwrap_or_default();
    let outcome =
        generator::generate_with_warnings(&items, project_start.unwrap_or_else(today), &config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(outcome.tasks)
}

/// Return copies of the tasks with dependencies inferred from categories.
#[pyfunction]
#[pyo3(name = "set_automatic_dependencies")]
fn py_set_automatic_dependencies(tasks: Vec<Task>) -> Vec<Task> {
    set_automatic_dependencies(&tasks)
}

/// Return copies of the tasks annotated with CPM timing.
///
/// # Raises
/// * ValueError if a circular dependency is detected
#[pyfunction]
#[pyo3(name = "optimize_schedule")]
fn py_optimize_schedule(tasks: Vec<Task>) -> PyResult<Vec<Task>> {
    optimize_schedule(&tasks).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Summarize task progress as of `today` (defaults to the local date).
#[pyfunction]
#[pyo3(name = "generate_progress_report", signature = (tasks, today=None))]
fn py_generate_progress_report(tasks: Vec<Task>, today: Option<NaiveDate>) -> ProgressReport {
    generate_progress_report(&tasks, today.unwrap_or_else(self::today))
}

/// Schedule a JSON array of tasks, returning the annotated array as JSON.
///
/// # Raises
/// * ValueError on malformed JSON or a circular dependency
#[pyfunction]
#[pyo3(name = "optimize_schedule_json")]
fn py_optimize_schedule_json(tasks_json: &str) -> PyResult<String> {
    optimize_schedule_json(tasks_json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Install a stderr log subscriber. Returns False if one was already set.
#[pyfunction]
#[pyo3(signature = (verbosity=0))]
fn init_logging(verbosity: u8) -> bool {
    logging::init_logging(verbosity)
}

/// The landscape_schedule Python module.
#[pymodule]
fn landscape_schedule(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<WorkItem>()?;
    m.add_class::<Category>()?;
    m.add_class::<Task>()?;
    m.add_class::<TaskTiming>()?;
    m.add_class::<ProgressReport>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_generate_processes_from_estimate, m)?)?;
    m.add_function(wrap_pyfunction!(py_set_automatic_dependencies, m)?)?;
    m.add_function(wrap_pyfunction!(py_optimize_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_generate_progress_report, m)?)?;
    m.add_function(wrap_pyfunction!(py_optimize_schedule_json, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    Ok(())
}
