//! Automatic dependency inference from work categories.
//!
//! Every task in an earlier stage blocks every task in every later stage.
//! This stage-boundary model is deliberately coarse: estimate line items
//! carry no finer precedence information. `General` tasks sit outside the
//! stage order, so they neither gain dependencies nor block anything.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::models::Task;

/// Return a copy of `tasks` with dependencies derived from categories.
///
/// Each task depends on the names of all tasks whose category comes strictly
/// earlier in [`Category::STAGE_ORDER`](crate::models::Category::STAGE_ORDER).
/// Existing dependencies are replaced. Names keep task-list order and appear
/// once each.
pub fn resolve_dependencies(tasks: &[Task]) -> Vec<Task> {
    let stages: Vec<Option<usize>> = tasks.iter().map(|t| t.category.stage()).collect();

    tasks
        .iter()
        .zip(&stages)
        .map(|(task, &stage)| {
            let mut resolved = task.clone();
            resolved.dependencies = match stage {
                Some(stage) => {
                    let mut seen: FxHashSet<&str> = FxHashSet::default();
                    tasks
                        .iter()
                        .zip(&stages)
                        .filter(|(_, other)| other.is_some_and(|s| s < stage))
                        .filter(|(other, _)| seen.insert(other.name.as_str()))
                        .map(|(other, _)| other.name.clone())
                        .collect()
                }
                None => Vec::new(),
            };
            debug!(
                task = %task.name,
                category = %task.category,
                dependencies = resolved.dependencies.len(),
                "resolved dependencies"
            );
            resolved
        })
        .collect()
}
