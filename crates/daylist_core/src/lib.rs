//! Core domain logic for Daylist.
//! This crate is the single source of truth for task list invariants.

pub mod config;
pub mod controller;
pub mod filter;
pub mod logging;
pub mod model;
pub mod quote;
pub mod render;
pub mod repo;
pub mod store;

pub use config::{CoreConfig, StorageKeys};
pub use controller::{
    Clock, ConfirmationProvider, ControllerResult, Effect, InteractionController, Outcome,
    TextInputProvider, UiEvent,
};
pub use filter::{filter_tasks, CategoryFilter};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{NewTask, Task, TaskId, TaskValidationError};
pub use quote::{daily_quote, QuoteBanner, QuoteSelector};
pub use render::{escape_html, render_list, Counters, ListView, TaskView};
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
