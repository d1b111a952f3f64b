//! Core logic for the taskbot personal task tracker.
//! This crate is the single source of truth for task invariants: command
//! parsing, the ordered task list, dispatch and persistence contracts.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod ui;

pub use command::parser::{parse_command, split_command, Command, ParseError, RawCommand};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskKind, TaskValidationError};
pub use repo::task_store::{SqliteTaskStore, StoreError, StoreResult, TaskStore};
pub use service::session::{CommandError, Outcome, Reply, Session};
pub use service::task_list::{TaskList, TaskListError};
pub use ui::Ui;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
