//! Command dispatch over one task-tracking session.
//!
//! # Responsibility
//! - Load the task list from the store at startup, recovering from failures.
//! - Run each input line as one parse → validate → mutate → render step.
//! - Persist the list on `bye` and on shutdown.
//!
//! # Invariants
//! - No error escapes `respond`; every failure becomes a rendered reply.
//! - A rejected command leaves the task list exactly as it was.
//! - Indices are bounds-checked before any list access.

use crate::command::parser::{parse_command, Command, ParseError};
use crate::model::task::{Task, TaskValidationError};
use crate::repo::task_store::{StoreResult, TaskStore};
use crate::service::task_list::{TaskList, TaskListError};
use crate::ui::Ui;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Every recoverable command failure, as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A to-do description is empty.
    IllegalArgument(TaskValidationError),
    IncompleteArgument {
        command: &'static str,
        usage: &'static str,
    },
    DateTimeParse {
        value: String,
    },
    /// Index argument is not an integer.
    InvalidIndex {
        value: String,
    },
    /// New event overlaps the event at `existing` (0-based).
    DateClash {
        existing: usize,
    },
    /// 1-based `index` is outside `[1, len]`.
    OutOfBounds {
        index: i64,
        len: usize,
    },
    Unrecognized {
        command: String,
    },
}

impl CommandError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IllegalArgument(_) => "illegal_argument",
            Self::IncompleteArgument { .. } => "incomplete_argument",
            Self::DateTimeParse { .. } => "date_time_parse",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::DateClash { .. } => "date_clash",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::Unrecognized { .. } => "unrecognized_command",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalArgument(err) => write!(f, "{err}"),
            Self::IncompleteArgument { command, usage } => {
                write!(f, "incomplete `{command}` arguments; expected `{usage}`")
            }
            Self::DateTimeParse { value } => write!(f, "invalid date-time `{value}`"),
            Self::InvalidIndex { value } => write!(f, "invalid task index `{value}`"),
            Self::DateClash { existing } => {
                write!(f, "event clashes with task {}", existing + 1)
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "task index {index} is outside 1..={len}")
            }
            Self::Unrecognized { command } => write!(f, "unrecognized command `{command}`"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IllegalArgument(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(value: ParseError) -> Self {
        match value {
            ParseError::IncompleteArgument { command, usage } => {
                Self::IncompleteArgument { command, usage }
            }
            ParseError::DateTimeParse { value } => Self::DateTimeParse { value },
            ParseError::InvalidIndex { value } => Self::InvalidIndex { value },
        }
    }
}

impl From<TaskValidationError> for CommandError {
    fn from(value: TaskValidationError) -> Self {
        Self::IllegalArgument(value)
    }
}

impl From<TaskListError> for CommandError {
    fn from(value: TaskListError) -> Self {
        match value {
            TaskListError::DateClash { existing } => Self::DateClash { existing },
        }
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Rejected(CommandError),
    /// `bye` was received; `saved` reports whether persistence succeeded.
    Exit { saved: bool },
}

/// Rendered result of one `respond` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub outcome: Outcome,
    pub message: String,
}

impl Reply {
    fn completed(message: String) -> Self {
        Self {
            outcome: Outcome::Completed,
            message,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.outcome, Outcome::Exit { .. })
    }

    pub fn error(&self) -> Option<&CommandError> {
        match &self.outcome {
            Outcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// One interactive session: presentation, storage and the live task list.
pub struct Session<S: TaskStore> {
    ui: Ui,
    store: S,
    tasks: TaskList,
    loading_error: Option<String>,
}

impl<S: TaskStore> Session<S> {
    /// Opens a session with the default presentation.
    pub fn open(store: S) -> Self {
        Self::with_ui(store, Ui::default())
    }

    /// Opens a session, loading persisted tasks from `store`.
    ///
    /// Store failures never abort startup: the session begins with an empty
    /// list and keeps a rendered loading-error message.
    pub fn with_ui(store: S, ui: Ui) -> Self {
        let mut loading_error = None;

        if let Err(err) = store.check_store() {
            warn!("event=session_load module=session status=error stage=check error={err}");
            loading_error = Some(ui.loading_error(&err));
        }

        let tasks = match store.read_tasks() {
            Ok(tasks) => {
                info!(
                    "event=session_load module=session status=ok tasks={}",
                    tasks.len()
                );
                TaskList::from_tasks(tasks)
            }
            Err(err) => {
                warn!("event=session_load module=session status=error stage=read error={err}");
                if loading_error.is_none() {
                    loading_error = Some(ui.loading_error(&err));
                }
                TaskList::new()
            }
        };

        Self {
            ui,
            store,
            tasks,
            loading_error,
        }
    }

    pub fn greet(&self) -> String {
        self.ui.greet()
    }

    /// Loading-error text recorded at startup, if any.
    pub fn loading_error(&self) -> Option<&str> {
        self.loading_error.as_deref()
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Handles one input line and renders its outcome.
    pub fn respond(&mut self, input: &str) -> Reply {
        let result = parse_command(input)
            .map_err(CommandError::from)
            .and_then(|command| self.execute(command));

        match result {
            Ok(reply) => reply,
            Err(err) => {
                info!(
                    "event=command module=session status=rejected error_code={}",
                    err.code()
                );
                Reply {
                    message: self.ui.command_error(&err),
                    outcome: Outcome::Rejected(err),
                }
            }
        }
    }

    /// Persists the current task sequence.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save_tasks(self.tasks.tasks())
    }

    /// Persists on shutdown without `bye`; returns a rendered message when
    /// saving fails.
    pub fn shutdown(&self) -> Option<String> {
        match self.save() {
            Ok(()) => None,
            Err(err) => {
                warn!("event=session_shutdown module=session status=error error={err}");
                Some(self.ui.save_error(&err))
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        debug!(
            "event=command module=session status=start command={}",
            command_label(&command)
        );
        match command {
            Command::Bye => Ok(self.bye()),
            Command::List => Ok(Reply::completed(self.ui.task_list(self.tasks.tasks()))),
            Command::Mark(index) | Command::Unmark(index) => {
                let index0 = self.checked_index(index)?;
                let len = self.tasks.len();
                let task = self
                    .tasks
                    .toggle(index0)
                    .ok_or(CommandError::OutOfBounds { index, len })?;
                Ok(Reply::completed(self.ui.task_marked(task)))
            }
            Command::Delete(index) => {
                let index0 = self.checked_index(index)?;
                let removed = self.tasks.remove(index0).ok_or(CommandError::OutOfBounds {
                    index,
                    len: self.tasks.len(),
                })?;
                Ok(Reply::completed(
                    self.ui.task_removed(&removed, self.tasks.len()),
                ))
            }
            Command::Todo { description } => self.add(Task::todo(description)?),
            Command::Deadline {
                description,
                due_at,
            } => self.add(Task::deadline(description, due_at)),
            Command::Event {
                description,
                starts_at,
                ends_at,
            } => self.add(Task::event(description, starts_at, ends_at)),
            Command::Find { keyword } => {
                let matches = self.tasks.find(&keyword);
                Ok(Reply::completed(self.ui.find_results(&matches)))
            }
            Command::Unknown(command) => Err(CommandError::Unrecognized { command }),
        }
    }

    fn add(&mut self, task: Task) -> Result<Reply, CommandError> {
        let rendered = task.clone();
        self.tasks.add(task)?;
        info!(
            "event=task_add module=session status=ok kind={} tasks={}",
            rendered.kind().label(),
            self.tasks.len()
        );
        Ok(Reply::completed(
            self.ui.task_added(&rendered, self.tasks.len()),
        ))
    }

    fn bye(&self) -> Reply {
        let mut message = self.ui.goodbye();
        let saved = match self.save() {
            Ok(()) => true,
            Err(err) => {
                warn!("event=session_save module=session status=error error={err}");
                message.push('\n');
                message.push_str(&self.ui.save_error(&err));
                false
            }
        };
        Reply {
            outcome: Outcome::Exit { saved },
            message,
        }
    }

    fn checked_index(&self, index: i64) -> Result<usize, CommandError> {
        self.tasks
            .checked_index(index)
            .ok_or(CommandError::OutOfBounds {
                index,
                len: self.tasks.len(),
            })
    }
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Bye => "bye",
        Command::List => "list",
        Command::Mark(_) => "mark",
        Command::Unmark(_) => "unmark",
        Command::Delete(_) => "delete",
        Command::Todo { .. } => "todo",
        Command::Deadline { .. } => "deadline",
        Command::Event { .. } => "event",
        Command::Find { .. } => "find",
        Command::Unknown(_) => "unknown",
    }
}
