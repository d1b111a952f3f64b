//! Persisted task store contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract the session relies on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A save followed by a read reproduces the same task sequence.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_store;
