//! Task arena for fast graph lookups.
//!
//! Maps task ids and names to dense integer indices so the critical path
//! passes can work on plain vectors. Dependency references are resolved
//! against the arena exactly once.

use rustc_hash::FxHashMap;

use crate::models::Task;

/// Arena index of a task (u32 for compact storage and fast hashing).
pub type TaskIdx = u32;

/// Index over a task slice keyed by id and by name.
#[derive(Debug, Clone)]
pub struct TaskArena {
    by_id: FxHashMap<String, TaskIdx>,
    by_name: FxHashMap<String, Vec<TaskIdx>>,
    names: Vec<String>,
}

impl TaskArena {
    /// Build an arena over `tasks`; index `i` refers to `tasks[i]`.
    ///
    /// When two tasks share an id, the first one owns it.
    pub fn new(tasks: &[Task]) -> Self {
        let mut by_id = FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        let mut by_name: FxHashMap<String, Vec<TaskIdx>> =
            FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        let mut names = Vec::with_capacity(tasks.len());

        for (i, task) in tasks.iter().enumerate() {
            let idx = i as TaskIdx;
            by_id.entry(task.id.clone()).or_insert(idx);
            by_name.entry(task.name.clone()).or_default().push(idx);
            names.push(task.name.clone());
        }

        Self {
            by_id,
            by_name,
            names,
        }
    }

    /// Resolve a dependency reference to arena indices.
    ///
    /// An exact id match wins; otherwise every task carrying that name is
    /// returned. Empty when nothing matches.
    pub fn resolve(&self, reference: &str) -> &[TaskIdx] {
        if let Some(idx) = self.by_id.get(reference) {
            return std::slice::from_ref(idx);
        }
        self.by_name
            .get(reference)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Name of the task at `idx`.
    #[inline]
    pub fn name(&self, idx: TaskIdx) -> Option<&str> {
        self.names.get(idx as usize).map(|s| s.as_str())
    }

    /// Number of tasks in the arena.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
