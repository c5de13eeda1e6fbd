//! Critical path calculation using forward and backward passes.

use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use crate::arena::{TaskArena, TaskIdx};
use crate::models::{Task, TaskTiming, MAX_DURATION_DAYS};

use super::graph::TaskGraph;
use super::types::{ScheduleOutcome, ScheduleWarning, SchedulingError};

/// Durations indexed by arena index, clamped to `1..=MAX_DURATION_DAYS`.
fn effective_durations(tasks: &[Task], warnings: &mut Vec<ScheduleWarning>) -> Vec<i64> {
    tasks
        .iter()
        .map(|task| {
            let (duration, warning) = match task.duration_days {
                d if d < 1 => (
                    1,
                    ScheduleWarning::InvalidDuration {
                        task: task.name.clone(),
                        duration: d,
                    },
                ),
                d if d > MAX_DURATION_DAYS => (
                    MAX_DURATION_DAYS,
                    ScheduleWarning::DurationCapped {
                        task: task.name.clone(),
                        duration: d,
                    },
                ),
                d => return d,
            };
            warn!("{warning}");
            warnings.push(warning);
            duration
        })
        .collect()
}

/// Run the forward and backward passes over a topologically ordered graph.
///
/// Returns the timing of every task (indexed by arena index) and the
/// project duration.
fn compute_timings(
    graph: &TaskGraph,
    topo_order: &[TaskIdx],
    durations: &[i64],
) -> (Vec<TaskTiming>, i64) {
    let mut timings = vec![TaskTiming::default(); graph.len()];

    // Forward pass: earliest start = max finish of all dependencies
    for &idx in topo_order {
        let i = idx as usize;
        let early_start = graph.deps[i]
            .iter()
            .map(|&d| timings[d as usize].early_finish)
            .max()
            .unwrap_or(0);

        let timing = &mut timings[i];
        timing.early_start = early_start;
        timing.early_finish = early_start + durations[i];
    }

    let project_duration = timings.iter().map(|t| t.early_finish).max().unwrap_or(0);

    // Backward pass: latest finish = min latest start of all dependents
    for &idx in topo_order.iter().rev() {
        let i = idx as usize;
        let late_finish = graph.dependents[i]
            .iter()
            .map(|&s| timings[s as usize].late_start)
            .min()
            .unwrap_or(project_duration);

        let timing = &mut timings[i];
        timing.late_finish = late_finish;
        timing.late_start = late_finish - durations[i];
        timing.total_float = timing.late_start - timing.early_start;
        timing.is_critical = timing.total_float == 0;
    }

    (timings, project_duration)
}

fn offset_date(anchor: NaiveDate, days: i64) -> NaiveDate {
    anchor
        .checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Compute CPM timing for every task.
///
/// Dependency references resolve by task id first, then by task name.
/// Unknown references are treated as satisfied at day 0 and reported as
/// warnings. The input is never modified: the returned tasks are copies with
/// `timing` filled in and display dates moved to
/// `anchor + early_start .. anchor + early_finish`, where `anchor` is the
/// earliest `start_date` among the inputs.
///
/// # Returns
/// * `Ok(ScheduleOutcome)` with annotated tasks in input order
/// * `Err(SchedulingError::CircularDependency)` if the task graph has cycles
pub fn schedule_with_summary(tasks: &[Task]) -> Result<ScheduleOutcome, SchedulingError> {
    let arena = TaskArena::new(tasks);
    let (graph, mut warnings) = TaskGraph::build(tasks, &arena);
    let topo_order = graph.topological_sort(&arena)?;
    let durations = effective_durations(tasks, &mut warnings);

    let (timings, project_duration) = compute_timings(&graph, &topo_order, &durations);

    let Some(anchor) = tasks.iter().map(|t| t.start_date).min() else {
        return Ok(ScheduleOutcome {
            warnings,
            ..Default::default()
        });
    };

    let scheduled: Vec<Task> = tasks
        .iter()
        .zip(timings.iter().zip(&durations))
        .map(|(task, (&timing, &duration_days))| {
            debug!(
                task = %task.name,
                es = timing.early_start,
                ef = timing.early_finish,
                ls = timing.late_start,
                lf = timing.late_finish,
                float = timing.total_float,
                "scheduled"
            );
            Task {
                duration_days,
                start_date: offset_date(anchor, timing.early_start),
                end_date: offset_date(anchor, timing.early_finish),
                timing: Some(timing),
                ..task.clone()
            }
        })
        .collect();

    let critical_path: Vec<String> = topo_order
        .iter()
        .filter(|&&idx| timings[idx as usize].is_critical)
        .map(|&idx| tasks[idx as usize].id.clone())
        .collect();

    info!(
        tasks = scheduled.len(),
        project_duration,
        critical = critical_path.len(),
        warnings = warnings.len(),
        "critical path schedule computed"
    );

    Ok(ScheduleOutcome {
        tasks: scheduled,
        project_duration,
        critical_path,
        warnings,
    })
}

/// Compute CPM timing for every task, returning only the annotated tasks.
pub fn schedule(tasks: &[Task]) -> Result<Vec<Task>, SchedulingError> {
    schedule_with_summary(tasks).map(|outcome| outcome.tasks)
}
