//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory task list and its mutation rules.
//! - Dispatch parsed commands against the list and render their outcome.
//! - Keep callers decoupled from storage details.

pub mod session;
pub mod task_list;
