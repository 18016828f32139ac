//! Client-held read model of the task collection.
//!
//! A presentation layer keeps one of these in sync with the server: a full
//! refresh whenever a filter criterion changes, and an incremental patch
//! after each confirmed mutation. Patches are applied only from successful
//! server responses, so a failed call simply never touches the model — the
//! previous contents stay visible and the error is the caller's to surface.

use crate::task::Task;

/// Ordered mirror of the server's task set.
#[derive(Debug, Clone, Default)]
pub struct ReadModel {
    tasks: Vec<Task>,
}

impl ReadModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replace the whole collection with a fresh listing response.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// A confirmed create prepends: listings are newest-first.
    pub fn insert_created(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// A confirmed update replaces the matching entry by id.
    ///
    /// An id no longer present (deleted between listing and patch) is left
    /// alone; the next refresh reconciles.
    pub fn apply_updated(&mut self, updated: Task) {
        if let Some(entry) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *entry = updated;
        }
    }

    /// A confirmed delete removes the matching entry by id.
    pub fn remove_deleted(&mut self, id: u64) {
        self.tasks.retain(|task| task.id != id);
    }
}
