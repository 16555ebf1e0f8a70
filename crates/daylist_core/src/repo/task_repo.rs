//! Task repository: the in-memory list and its persisted snapshot.
//!
//! # Responsibility
//! - Own the ordered task list; the only component that mutates it.
//! - Mirror every effective mutation to the key-value store.
//!
//! # Invariants
//! - Task ids are unique across the list.
//! - Each effective mutation performs exactly one store write before
//!   returning; not-found no-ops perform none.
//! - A missing or unparseable snapshot loads as an empty list.

use crate::model::task::{NewTask, Task, TaskValidationError};
use crate::store::{KeyValueStore, StoreError, TASKS_KEY};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task mutations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "task store write failed: {err}"),
            Self::Serialize(err) => write!(f, "task list serialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Ordered task list backed by a key-value store.
pub struct TaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Loads the list stored under the default tasks key.
    pub fn load(store: S) -> Self {
        Self::load_at(store, TASKS_KEY)
    }

    /// Loads the list stored under `key`.
    ///
    /// Never fails: absent, unreadable and corrupt snapshots all yield an
    /// empty list.
    pub fn load_at(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=tasks_load module=repo status=recovered reason=corrupt_payload error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=tasks_load module=repo status=recovered reason=read_failed error={err}");
                Vec::new()
            }
        };

        info!(
            "event=tasks_load module=repo status=ok count={}",
            tasks.len()
        );
        Self { store, key, tasks }
    }

    /// Current list in display and persistence order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Gives the quote selector access to the shared store. Outside the
    /// crate every write goes through the repository:
    ///
    /// ```compile_fail
    /// use daylist_core::{KeyValueStore, MemoryStore, TaskRepository};
    ///
    /// let mut repo = TaskRepository::load(MemoryStore::new());
    /// repo.store_mut().set("myTodo.tasks.finalv1", "[]").unwrap();
    /// ```
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a task at the front of the list.
    ///
    /// # Errors
    /// - [`RepoError::Validation`] when the text is blank; nothing changes.
    /// - [`RepoError::Store`] when the snapshot write fails.
    pub fn add(&mut self, request: NewTask) -> RepoResult<Task> {
        let mut task = request.into_task()?;
        // Ids stay unique across the list, even for imported payloads.
        while self.position(&task.id).is_some() {
            task.id = uuid::Uuid::new_v4().to_string();
        }

        self.tasks.insert(0, task.clone());
        self.persist("task_add")?;
        Ok(task)
    }

    /// Flips the completion flag. Returns `false` when `id` is unknown.
    pub fn toggle_complete(&mut self, id: &str) -> RepoResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(self.skip("task_toggle"));
        };

        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        self.persist("task_toggle")?;
        Ok(true)
    }

    /// Replaces the note with its trimmed value; empty clears it.
    pub fn set_note(&mut self, id: &str, note: &str) -> RepoResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(self.skip("task_note"));
        };

        self.tasks[index].note = note.trim().to_string();
        self.persist("task_note")?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> RepoResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(self.skip("task_delete"));
        };

        self.tasks.remove(index);
        self.persist("task_delete")?;
        Ok(true)
    }

    /// Empties the list. Always writes, even when already empty.
    pub fn clear_all(&mut self) -> RepoResult<()> {
        self.tasks.clear();
        self.persist("task_clear")
    }

    /// Moves `source_id` immediately before `dest_id`.
    ///
    /// The source is removed first and reinserted at the destination's index
    /// in the shortened list, so the rule is the same in both directions.
    /// Returns `false` when either id is unknown or both are equal.
    pub fn reorder(&mut self, source_id: &str, dest_id: &str) -> RepoResult<bool> {
        if source_id == dest_id {
            return Ok(self.skip("task_reorder"));
        }
        let (Some(source), Some(_)) = (self.position(source_id), self.position(dest_id)) else {
            return Ok(self.skip("task_reorder"));
        };

        let moved = self.tasks.remove(source);
        let dest = self.position(dest_id).unwrap_or(self.tasks.len());
        self.tasks.insert(dest, moved);
        self.persist("task_reorder")?;
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn skip(&self, event: &str) -> bool {
        debug!("event={event} module=repo status=skip reason=not_found");
        false
    }

    fn persist(&mut self, event: &str) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.tasks)?;
        self.store.set(&self.key, &payload)?;
        info!(
            "event={event} module=repo status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TaskRepository;
    use crate::model::task::Task;
    use crate::store::{KeyValueStore, MemoryStore, TASKS_KEY};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task {id}"),
            due_date: None,
            category: "Home".to_string(),
            note: String::new(),
            completed: false,
        }
    }

    fn repo_with(ids: &[&str]) -> TaskRepository<MemoryStore> {
        let tasks: Vec<Task> = ids.iter().map(|id| task(id)).collect();
        let store = MemoryStore::with_entry(TASKS_KEY, serde_json::to_string(&tasks).unwrap());
        TaskRepository::load(store)
    }

    fn order(repo: &TaskRepository<MemoryStore>) -> Vec<&str> {
        repo.tasks().iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn reorder_forward_lands_before_destination() {
        let mut repo = repo_with(&["a", "b", "c", "d"]);
        assert!(repo.reorder("a", "c").unwrap());
        assert_eq!(order(&repo), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn reorder_backward_lands_before_destination() {
        let mut repo = repo_with(&["a", "b", "c", "d"]);
        assert!(repo.reorder("d", "b").unwrap());
        assert_eq!(order(&repo), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_unknown_or_equal_ids_does_not_write() {
        let mut repo = repo_with(&["a", "b"]);
        assert!(!repo.reorder("a", "a").unwrap());
        assert!(!repo.reorder("a", "zzz").unwrap());
        assert!(!repo.reorder("zzz", "b").unwrap());
        assert_eq!(order(&repo), vec!["a", "b"]);
        assert_eq!(repo.store().write_count(), 0);
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let store = MemoryStore::with_entry(TASKS_KEY, "[{not json");
        let repo = TaskRepository::load(store);
        assert!(repo.is_empty());
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let mut repo = TaskRepository::load_at(MemoryStore::new(), "other.key");
        repo.clear_all().unwrap();
        assert_eq!(repo.store().get("other.key").unwrap().as_deref(), Some("[]"));
        assert_eq!(repo.store().get(TASKS_KEY).unwrap(), None);
    }
}
