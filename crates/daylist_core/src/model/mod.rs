//! Domain model for the task list.
//!
//! # Responsibility
//! - Define canonical data structures used by core logic.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod task;
