//! Ordered in-memory task collection.
//!
//! # Responsibility
//! - Own the task sequence for one session.
//! - Enforce the event scheduling-conflict rule on insertion.
//! - Translate user-facing 1-based indices into checked 0-based positions.
//!
//! # Invariants
//! - Insertion order is display order and persisted order.
//! - A rejected `add` leaves the sequence untouched.
//! - Callers never receive mutable access to stored tasks.

use crate::model::task::Task;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task list mutation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// The new event overlaps the event stored at `existing` (0-based).
    DateClash { existing: usize },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateClash { existing } => write!(
                f,
                "event window clashes with task {} in the list",
                existing + 1
            ),
        }
    }
}

impl Error for TaskListError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-loaded sequence without re-running clash checks.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends `task`.
    ///
    /// # Errors
    /// - `DateClash` when `task` is an event overlapping a stored event.
    pub fn add(&mut self, task: Task) -> Result<(), TaskListError> {
        if task.window().is_some() {
            if let Some(existing) = self.tasks.iter().position(|t| t.clashes_with(&task)) {
                debug!(
                    "event=task_add module=task_list status=rejected reason=date_clash existing_index={}",
                    existing + 1
                );
                return Err(TaskListError::DateClash { existing });
            }
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Converts a user-facing 1-based index into a 0-based position, or
    /// `None` when it falls outside `[1, len]`.
    pub fn checked_index(&self, index: i64) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .and_then(|index| index.checked_sub(1))
            .filter(|index0| *index0 < self.tasks.len())
    }

    pub fn get(&self, index0: usize) -> Option<&Task> {
        self.tasks.get(index0)
    }

    /// Toggles the done-state of the task at `index0` and returns it.
    pub fn toggle(&mut self, index0: usize) -> Option<&Task> {
        let task = self.tasks.get_mut(index0)?;
        task.mark();
        Some(task)
    }

    /// Removes and returns the task at `index0`; later tasks shift down.
    pub fn remove(&mut self, index0: usize) -> Option<Task> {
        if index0 < self.tasks.len() {
            Some(self.tasks.remove(index0))
        } else {
            None
        }
    }

    /// Returns tasks whose description contains `keyword` (case-sensitive),
    /// in list order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read-only view of the full sequence for rendering and persistence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::TaskList;
    use crate::model::task::Task;

    #[test]
    fn checked_index_rejects_zero_negative_and_past_end() {
        let mut list = TaskList::new();
        list.add(Task::todo("a").unwrap()).unwrap();
        list.add(Task::todo("b").unwrap()).unwrap();

        assert_eq!(list.checked_index(0), None);
        assert_eq!(list.checked_index(-1), None);
        assert_eq!(list.checked_index(3), None);
        assert_eq!(list.checked_index(1), Some(0));
        assert_eq!(list.checked_index(2), Some(1));
    }

    #[test]
    fn remove_out_of_range_returns_none_and_keeps_tasks() {
        let mut list = TaskList::new();
        list.add(Task::todo("a").unwrap()).unwrap();
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 1);
    }
}
