//! Dependency graph over the task arena, with topological ordering.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::warn;

use crate::arena::{TaskArena, TaskIdx};
use crate::models::Task;

use super::types::{ScheduleWarning, SchedulingError};

/// Adjacency lists indexed by arena index.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    /// Tasks that must finish before each task starts.
    pub deps: Vec<Vec<TaskIdx>>,
    /// Reverse edges: tasks that list each task as a dependency.
    pub dependents: Vec<Vec<TaskIdx>>,
}

impl TaskGraph {
    /// Resolve every task's dependency references once and build both edge
    /// directions.
    ///
    /// When a name is shared, the referring task's own match is dropped so
    /// it waits only on the other holders. A task that is the sole match for
    /// its own id or name keeps the self edge, which sorting then reports as
    /// a cycle.
    /// References that match nothing produce a warning and no edge.
    pub fn build(tasks: &[Task], arena: &TaskArena) -> (Self, Vec<ScheduleWarning>) {
        let n = arena.len();
        let mut deps: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut warnings = Vec::new();

        for (i, task) in tasks.iter().enumerate() {
            let idx = i as TaskIdx;
            let mut seen: FxHashSet<TaskIdx> = FxHashSet::default();

            for reference in &task.dependencies {
                let resolved = arena.resolve(reference);
                // Another holder of a shared name absorbs the self match
                let shared_name = task.id != *reference && resolved.iter().any(|&t| t != idx);
                let targets: Vec<TaskIdx> = resolved
                    .iter()
                    .copied()
                    .filter(|&t| t != idx || !shared_name)
                    .collect();

                if targets.is_empty() {
                    let warning = ScheduleWarning::UnresolvedDependency {
                        task: task.name.clone(),
                        reference: reference.clone(),
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                    continue;
                }

                for target in targets {
                    if seen.insert(target) {
                        deps[i].push(target);
                        dependents[target as usize].push(idx);
                    }
                }
            }
        }

        (Self { deps, dependents }, warnings)
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Order tasks so every dependency precedes its dependents (Kahn's
    /// algorithm).
    ///
    /// Ties are broken by arena index, so the order is deterministic.
    /// Fails with the names along one cycle when not every task can be
    /// ordered.
    pub fn topological_sort(&self, arena: &TaskArena) -> Result<Vec<TaskIdx>, SchedulingError> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.deps.iter().map(|d| d.len()).collect();

        let mut queue: VecDeque<TaskIdx> = (0..n)
            .filter(|&i| in_degree[i] == 0)
            .map(|i| i as TaskIdx)
            .collect();

        let mut order: Vec<TaskIdx> = Vec::with_capacity(n);

        while let Some(idx) = queue.pop_front() {
            order.push(idx);

            for &dependent in &self.dependents[idx as usize] {
                let degree = &mut in_degree[dependent as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != n {
            let cycle = self
                .find_cycle(&in_degree)
                .into_iter()
                .filter_map(|idx| arena.name(idx).map(str::to_string))
                .collect();
            return Err(SchedulingError::CircularDependency(cycle));
        }

        Ok(order)
    }

    /// Extract one cycle from the tasks Kahn's algorithm could not order.
    ///
    /// Every leftover task still has a leftover dependency, so walking
    /// dependency edges from any of them must revisit a task. The result
    /// lists the cycle dependency-first.
    fn find_cycle(&self, in_degree: &[usize]) -> Vec<TaskIdx> {
        let leftover = |idx: TaskIdx| in_degree[idx as usize] > 0;

        let Some(start) = (0..self.len()).map(|i| i as TaskIdx).find(|&i| leftover(i)) else {
            return Vec::new();
        };

        let mut position: Vec<Option<usize>> = vec![None; self.len()];
        let mut path: Vec<TaskIdx> = Vec::new();
        let mut current = start;

        loop {
            if let Some(pos) = position[current as usize] {
                let mut cycle = path.split_off(pos);
                cycle.reverse();
                return cycle;
            }
            position[current as usize] = Some(path.len());
            path.push(current);

            match self.deps[current as usize]
                .iter()
                .copied()
                .find(|&d| leftover(d))
            {
                Some(next) => current = next,
                None => return path,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn make_task(id: &str, deps: Vec<&str>) -> Task {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Task {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            source_item_id: None,
            category: Category::General,
            duration_days: 1,
            dependencies: deps.into_iter().map(String::from).collect(),
            progress: 0,
            start_date: date,
            end_date: date,
            timing: None,
        }
    }

    fn build(tasks: &[Task]) -> (TaskArena, TaskGraph, Vec<ScheduleWarning>) {
        let arena = TaskArena::new(tasks);
        let (graph, warnings) = TaskGraph::build(tasks, &arena);
        (arena, graph, warnings)
    }

    #[test]
    fn test_build_resolves_ids_and_names() {
        // b refers to a by id, c refers to a and b by name
        let tasks = vec![
            make_task("a", vec![]),
            make_task("b", vec!["a"]),
            make_task("c", vec!["A", "B", "a"]),
        ];
        let (_, graph, warnings) = build(&tasks);

        assert!(warnings.is_empty());
        assert_eq!(graph.deps[1], vec![0]);
        assert_eq!(graph.deps[2], vec![0, 1]); // duplicate "a" collapsed
        assert_eq!(graph.dependents[0], vec![1, 2]);
    }

    #[test]
    fn test_unresolved_reference_warns() {
        let tasks = vec![make_task("a", vec!["ghost"])];
        let (_, graph, warnings) = build(&tasks);

        assert!(graph.deps[0].is_empty());
        assert_eq!(
            warnings,
            vec![ScheduleWarning::UnresolvedDependency {
                task: "A".to_string(),
                reference: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_topological_order() {
        let tasks = vec![
            make_task("c", vec!["b"]),
            make_task("b", vec!["a"]),
            make_task("a", vec![]),
        ];
        let (arena, graph, _) = build(&tasks);

        assert_eq!(graph.topological_sort(&arena).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn test_two_cycle_is_reported() {
        let tasks = vec![make_task("a", vec!["b"]), make_task("b", vec!["a"])];
        let (arena, graph, _) = build(&tasks);

        let err = graph.topological_sort(&arena).unwrap_err();
        assert_eq!(
            err,
            SchedulingError::CircularDependency(vec!["B".to_string(), "A".to_string()])
        );
    }

    #[test]
    fn test_cycle_excludes_tasks_merely_downstream() {
        // x -> (a <-> b) -> y; only a and b form the cycle
        let tasks = vec![
            make_task("x", vec![]),
            make_task("a", vec!["x", "b"]),
            make_task("b", vec!["a"]),
            make_task("y", vec!["b"]),
        ];
        let (arena, graph, _) = build(&tasks);

        let SchedulingError::CircularDependency(cycle) =
            graph.topological_sort(&arena).unwrap_err();
        let mut names = cycle;
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_self_reference_by_id_is_a_cycle() {
        let tasks = vec![make_task("a", vec!["a"])];
        let (arena, graph, _) = build(&tasks);

        assert_eq!(
            graph.topological_sort(&arena),
            Err(SchedulingError::CircularDependency(vec!["A".to_string()]))
        );
    }

    #[test]
    fn test_self_reference_by_unique_name_is_a_cycle() {
        // "X" is held only by the task that depends on it
        let mut tasks = vec![make_task("p1", vec!["X"])];
        tasks[0].name = "X".to_string();
        let (arena, graph, warnings) = build(&tasks);

        assert!(warnings.is_empty());
        assert_eq!(graph.deps[0], vec![0]);
        assert_eq!(
            graph.topological_sort(&arena),
            Err(SchedulingError::CircularDependency(vec!["X".to_string()]))
        );
    }

    #[test]
    fn test_self_match_by_name_is_ignored() {
        // Two tasks named "A"; the second refers to the name
        let mut tasks = vec![make_task("a", vec![]), make_task("a2", vec!["A"])];
        tasks[1].name = "A".to_string();
        let (arena, graph, warnings) = build(&tasks);

        assert!(warnings.is_empty());
        assert_eq!(graph.deps[1], vec![0]);
        assert!(graph.topological_sort(&arena).is_ok());
    }
}
