//! Progress aggregation over a task snapshot.

use chrono::NaiveDate;

use crate::models::{ProgressReport, Task};

fn clamped_progress(task: &Task) -> u8 {
    task.progress.min(100)
}

/// Summarize the live progress of `tasks` as of `today`.
///
/// A task is overdue when its end date is before `today` and it is not yet
/// complete. Progress above 100 counts as 100. An empty task set yields an
/// all-zero report that is on schedule.
pub fn report(tasks: &[Task], today: NaiveDate) -> ProgressReport {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| clamped_progress(t) == 100).count();
    let in_progress = tasks
        .iter()
        .filter(|t| (1..100).contains(&clamped_progress(t)))
        .count();
    let overdue = tasks
        .iter()
        .filter(|t| t.end_date < today && clamped_progress(t) < 100)
        .count();

    let (overall_progress, completion_rate) = if total == 0 {
        (0, 0.0)
    } else {
        let sum: u64 = tasks.iter().map(|t| u64::from(clamped_progress(t))).sum();
        let mean = sum as f64 / total as f64;
        (
            mean.round() as u8,
            completed as f64 / total as f64 * 100.0,
        )
    };

    ProgressReport {
        total_processes: total,
        completed_processes: completed,
        in_progress_processes: in_progress,
        overdue_processes: overdue,
        overall_progress,
        on_schedule: overdue == 0,
        completion_rate,
    }
}
