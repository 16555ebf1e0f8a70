//! Task domain model.
//!
//! # Responsibility
//! - Define the single persistent record of the task list.
//! - Keep the serialized shape compatible with the legacy JSON payload.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is non-empty for every task created through [`NewTask::into_task`].
//! - An empty `note` means "no note".

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Kept as a type alias so persisted payloads with non-UUID ids still load.
pub type TaskId = String;

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Calendar date string as entered by the user. Stored as `""` when absent.
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<String>,
    pub category: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Returns whether the note block should be shown.
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Creation request for one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub due_date: Option<String>,
    pub category: String,
    pub note: String,
}

impl NewTask {
    /// Creates a request with no due date and no note.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            due_date: None,
            category: category.into(),
            note: String::new(),
        }
    }

    /// Sets the due date; blank values mean "no due date".
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the initial note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validates the request and builds a task with a fresh id.
    ///
    /// # Errors
    /// - Returns [`TaskValidationError::EmptyText`] when `text` is blank.
    pub fn into_task(self) -> Result<Task, TaskValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        let due_date = self
            .due_date
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            due_date,
            category: self.category,
            note: self.note.trim().to_string(),
            completed: false,
        })
    }
}

/// Validation failure at the task creation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

mod due_date_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|value| !value.is_empty()))
    }
}
