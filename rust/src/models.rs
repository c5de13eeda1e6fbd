//! Core data types for the scheduling system.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest duration a single process may have (100 years of days).
///
/// Keeps the day arithmetic of the critical path passes far from overflow.
pub const MAX_DURATION_DAYS: i64 = 36_500;

/// A priced line item from an estimate.
///
/// Owned by the estimate subsystem; the scheduler only reads it.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in currency minor units.
    #[pyo3(get, set)]
    pub amount: f64,
}

#[pymethods]
impl WorkItem {
    #[new]
    #[pyo3(signature = (id, name, amount, description=None))]
    fn new(id: String, name: String, amount: f64, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
            amount,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "WorkItem(id={:?}, name={:?}, amount={})",
            self.id, self.name, self.amount
        )
    }
}

/// Work category of a construction process.
///
/// Variants are declared in stage order: a task in an earlier stage must
/// finish before any task in a later stage starts. `General` has no stage.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Preparation,
    Design,
    Procurement,
    Demolition,
    Earthwork,
    Foundation,
    Plumbing,
    Electrical,
    Structures,
    Paving,
    Planting,
    Lawn,
    Pruning,
    Finishing,
    Cleaning,
    Disposal,
    General,
}

impl Category {
    /// Staged categories in precedence order (`General` excluded).
    pub const STAGE_ORDER: [Category; 16] = [
        Category::Preparation,
        Category::Design,
        Category::Procurement,
        Category::Demolition,
        Category::Earthwork,
        Category::Foundation,
        Category::Plumbing,
        Category::Electrical,
        Category::Structures,
        Category::Paving,
        Category::Planting,
        Category::Lawn,
        Category::Pruning,
        Category::Finishing,
        Category::Cleaning,
        Category::Disposal,
    ];

    /// Position in the stage order, or `None` for `General`.
    pub fn stage(self) -> Option<usize> {
        Self::STAGE_ORDER.iter().position(|&c| c == self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Preparation => "preparation",
            Category::Design => "design",
            Category::Procurement => "procurement",
            Category::Demolition => "demolition",
            Category::Earthwork => "earthwork",
            Category::Foundation => "foundation",
            Category::Plumbing => "plumbing",
            Category::Electrical => "electrical",
            Category::Structures => "structures",
            Category::Paving => "paving",
            Category::Planting => "planting",
            Category::Lawn => "lawn",
            Category::Pruning => "pruning",
            Category::Finishing => "finishing",
            Category::Cleaning => "cleaning",
            Category::Disposal => "disposal",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[pymethods]
impl Category {
    #[getter]
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn __str__(&self) -> &'static str {
        self.as_str()
    }
}

/// Per-task timing produced by the forward and backward passes.
///
/// All values are whole days relative to the project start.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    #[pyo3(get)]
    pub early_start: i64,
    /// Earliest possible finish time (from forward pass).
    #[pyo3(get)]
    pub early_finish: i64,
    /// Latest allowable start time (from backward pass).
    #[pyo3(get)]
    pub late_start: i64,
    /// Latest allowable finish time (from backward pass).
    #[pyo3(get)]
    pub late_finish: i64,
    /// Total float = late_start - early_start.
    #[pyo3(get)]
    pub total_float: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl TaskTiming {
    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, float={})",
            self.early_start, self.early_finish, self.late_start, self.late_finish, self.total_float
        )
    }
}

/// A construction process in the project schedule.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the estimate line this process was generated from.
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_item_id: Option<String>,
    #[pyo3(get, set)]
    pub category: Category,
    #[pyo3(get, set)]
    pub duration_days: i64,
    /// References (task ids or names) to tasks that must finish first.
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Completion percentage, 0-100.
    #[pyo3(get, set)]
    #[serde(default)]
    pub progress: u8,
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    #[pyo3(get, set)]
    pub end_date: NaiveDate,
    #[pyo3(get)]
    #[serde(flatten)]
    pub timing: Option<TaskTiming>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        category,
        duration_days,
        start_date,
        end_date,
        dependencies=Vec::new(),
        progress=0,
        description=None,
        source_item_id=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        name: String,
        category: Category,
        duration_days: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        dependencies: Vec<String>,
        progress: u8,
        description: Option<String>,
        source_item_id: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            source_item_id,
            category,
            duration_days,
            dependencies,
            progress,
            start_date,
            end_date,
            timing: None,
        }
    }

    /// Whether the task lies on the critical path (false until scheduled).
    #[getter]
    pub fn is_critical(&self) -> bool {
        self.timing.is_some_and(|t| t.is_critical)
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, name={:?}, category={}, duration_days={}, deps={})",
            self.id,
            self.name,
            self.category,
            self.duration_days,
            self.dependencies.len()
        )
    }
}

/// Aggregate health metrics over a task set.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    #[pyo3(get)]
    pub total_processes: usize,
    #[pyo3(get)]
    pub completed_processes: usize,
    #[pyo3(get)]
    pub in_progress_processes: usize,
    #[pyo3(get)]
    pub overdue_processes: usize,
    /// Rounded mean of all progress values.
    #[pyo3(get)]
    pub overall_progress: u8,
    #[pyo3(get)]
    pub on_schedule: bool,
    /// Percentage of processes at 100% progress.
    #[pyo3(get)]
    pub completion_rate: f64,
}

#[pymethods]
impl ProgressReport {
    fn __repr__(&self) -> String {
        format!(
            "ProgressReport(total={}, completed={}, overdue={}, overall={}%)",
            self.total_processes,
            self.completed_processes,
            self.overdue_processes,
            self.overall_progress
        )
    }
}
