//! Persistent store adapter.
//!
//! # Responsibility
//! - Expose a string-keyed get/set contract that the repository and the
//!   quote selector depend on.
//! - Keep the concrete persistence mechanism swappable (SQLite, memory).
//!
//! # Invariants
//! - Each `get`/`set` is a complete operation; there are no partial writes.
//! - Keys are opaque to the store.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use schema::SCHEMA_VERSION;
pub use sqlite::SqliteStore;

/// Key holding the serialized task list.
pub const TASKS_KEY: &str = "myTodo.tasks.finalv1";
/// Key holding the ISO date of the last banner dismissal.
pub const QUOTE_DISMISSED_KEY: &str = "myTodo.quoteClosedDate";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a store implementation.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The store file was written by a newer build with a different `kv` layout.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable local key-value persistence.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}
