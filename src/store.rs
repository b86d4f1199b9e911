// Task store: in-memory sequence synchronized with a JSON file

use crate::error::{Result, StoreError};
use crate::filter::Filter;
use crate::json;
use crate::task::{Priority, Task, TaskPatch};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Owner of the task sequence and its backing file
///
/// Every mutating operation persists the whole sequence before returning.
/// A failed save does not roll back the mutation; the error is logged and
/// queued so the caller can report it via [`TaskStore::take_warnings`].
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
    warnings: Vec<StoreError>,
}

impl TaskStore {
    /// Open the store backed by `path`.
    ///
    /// Never fails. A missing file yields an empty store. An unreadable or
    /// malformed file, one with duplicate ids, or one whose largest id leaves
    /// no successor also yields an empty store and queues a warning.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut warnings = Vec::new();

        let loaded = json::read_tasks(&path).and_then(|tasks| match tasks {
            Some(tasks) => Self::seed_next_id(&tasks).map(|next_id| (tasks, next_id)),
            None => {
                info!(file = ?path, "Task file not found, starting with an empty list");
                Ok((Vec::new(), 1))
            }
        });

        let (tasks, next_id) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(file = ?path, error = %e, "Failed to load tasks, starting with an empty list");
                warnings.push(e);
                (Vec::new(), 1)
            }
        };

        Self {
            path,
            tasks,
            next_id,
            warnings,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drain warnings from recovered load or save failures.
    pub fn take_warnings(&mut self) -> Vec<StoreError> {
        std::mem::take(&mut self.warnings)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a task with status TODO and persist.
    pub fn add(&mut self, title: &str, description: &str, due_date: NaiveDate, priority: Priority) -> Result<Task> {
        Self::validate_title(title)?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdExhausted { max: id })?;

        let task = Task::new(id, title.to_string(), description.to_string(), due_date, priority);
        debug!(id, title, %due_date, %priority, "add: appending task");
        self.tasks.push(task.clone());

        self.persist();
        Ok(task)
    }

    /// Apply a sparse patch to the task with `id` and persist.
    ///
    /// An empty patch still reports a missing id but skips the save.
    pub fn edit(&mut self, id: u64, patch: TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }

        let task = self.find_mut(id)?;
        if patch.is_empty() {
            return Ok(task.clone());
        }
        debug!(id, ?patch, "edit: applying patch");
        task.apply(patch);
        let updated = task.clone();

        self.persist();
        Ok(updated)
    }

    /// Remove the task with `id` and persist. The id is never handed out again.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.tasks.remove(index);
        debug!(id, "delete: removed task");

        self.persist();
        Ok(removed)
    }

    /// Stable sort by ascending due date. Not persisted until the next save.
    pub fn sort_by_date(&mut self) {
        self.tasks.sort_by_key(|t| t.due_date);
        debug!(count = self.tasks.len(), "Sorted tasks by due date");
    }

    /// Stable sort by ascending priority rank. Not persisted until the next save.
    pub fn sort_by_priority(&mut self) {
        self.tasks.sort_by_key(|t| t.priority.rank());
        debug!(count = self.tasks.len(), "Sorted tasks by priority");
    }

    /// Write the current sequence to the backing file.
    ///
    /// Unlike the implicit save after a mutation, the error is returned
    /// directly and not queued.
    pub fn save(&self) -> Result<()> {
        json::write_tasks(&self.path, &self.tasks)?;
        info!(file = ?self.path, count = self.tasks.len(), "Saved tasks");
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// All tasks in current order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks due before today (local clock) that are not done.
    pub fn list_overdue(&self) -> Vec<Task> {
        self.list_overdue_on(Local::now().date_naive())
    }

    /// Tasks due before `today` that are not done.
    pub fn list_overdue_on(&self, today: NaiveDate) -> Vec<Task> {
        self.filter(&Filter::Overdue { today })
    }

    pub fn list_done(&self) -> Vec<Task> {
        self.filter(&Filter::Done)
    }

    /// Case-insensitive keyword search over title, description, priority and status.
    pub fn search(&self, keyword: &str) -> Result<Vec<Task>> {
        let Some(filter) = Filter::keyword(keyword) else {
            return Err(StoreError::Validation("Search keyword cannot be empty".to_string()));
        };
        Ok(self.filter(&filter))
    }

    pub fn filter(&self, filter: &Filter) -> Vec<Task> {
        filter.apply(&self.tasks)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// One past the largest id, or 1 for an empty sequence.
    fn seed_next_id(tasks: &[Task]) -> Result<u64> {
        match tasks.iter().map(Task::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StoreError::IdExhausted { max }),
        }
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Save after a mutation; failures become warnings.
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(file = ?self.path, error = %e, "Failed to save tasks, keeping in-memory changes");
            self.warnings.push(e);
        }
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(StoreError::Validation("Task title cannot be empty".to_string()));
        }
        Ok(())
    }
}
