//! Repository layer over the persisted task snapshot.
//!
//! # Responsibility
//! - Hold the authoritative in-memory task list.
//! - Isolate serialization and store details from the controller.
//!
//! # Invariants
//! - Repository writes validate creation input before persistence.
//! - Stale ids are silent no-ops, never errors.

pub mod task_repo;
