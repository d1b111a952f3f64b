//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task shapes shared by parsing, list and storage code.
//! - Keep rendering of a single task in one place.
//!
//! # Invariants
//! - A to-do task never carries an empty description.
//! - Every task starts out not done.

pub mod task;
