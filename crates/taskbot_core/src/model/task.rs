//! Task domain model.
//!
//! # Responsibility
//! - Define the to-do / deadline / event variants as one tagged shape.
//! - Provide done-state toggling and the stable one-line rendering.
//! - Decide whether two event windows clash.
//!
//! # Invariants
//! - `Task::todo` rejects an empty description.
//! - `is_done` starts as `false` for every constructor except `from_parts`.
//! - Event windows are not validated for order; clash checks compare the
//!   normalized (earlier, later) pair.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Format used when a date-time is shown to the user.
pub const DISPLAY_DATE_TIME_FORMAT: &str = "%b %d %Y %H:%M";

/// Variant-specific scheduling data.
///
/// Serialized with a `kind` tag so persisted or exported records stay
/// self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain task without any date.
    Todo,
    /// Task that must be finished by `due_at`.
    Deadline { due_at: NaiveDateTime },
    /// Task occupying the window between `starts_at` and `ends_at`.
    Event {
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    },
}

impl TaskKind {
    /// Single-letter tag used in list rendering.
    pub fn tag(&self) -> char {
        match self {
            Self::Todo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }

    /// Stable lowercase label used by storage and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
        }
    }
}

/// Model-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    description: String,
    is_done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl Task {
    /// Creates a to-do task.
    ///
    /// # Errors
    /// - `EmptyDescription` when `description` is empty.
    pub fn todo(description: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::from_parts(description, false, TaskKind::Todo)
    }

    /// Creates a deadline task due at `due_at`.
    pub fn deadline(description: impl Into<String>, due_at: NaiveDateTime) -> Self {
        Self {
            description: description.into(),
            is_done: false,
            kind: TaskKind::Deadline { due_at },
        }
    }

    /// Creates an event task. The window order is not checked.
    pub fn event(
        description: impl Into<String>,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Self {
        Self {
            description: description.into(),
            is_done: false,
            kind: TaskKind::Event { starts_at, ends_at },
        }
    }

    /// Rebuilds a task from stored fields, applying the same validation as
    /// the public constructors.
    pub fn from_parts(
        description: impl Into<String>,
        is_done: bool,
        kind: TaskKind,
    ) -> Result<Self, TaskValidationError> {
        let description = description.into();
        if kind == TaskKind::Todo && description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(Self {
            description,
            is_done,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Flips the done-state.
    pub fn mark(&mut self) {
        self.is_done = !self.is_done;
    }

    /// Returns the event window ordered as (earlier, later), or `None` for
    /// non-event tasks.
    pub fn window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self.kind {
            TaskKind::Event { starts_at, ends_at } if starts_at <= ends_at => {
                Some((starts_at, ends_at))
            }
            TaskKind::Event { starts_at, ends_at } => Some((ends_at, starts_at)),
            _ => None,
        }
    }

    /// Returns whether both tasks are events whose windows overlap.
    ///
    /// Windows that only touch (one ends exactly when the other starts) do
    /// not clash.
    pub fn clashes_with(&self, other: &Task) -> bool {
        match (self.window(), other.window()) {
            (Some((start_a, end_a)), Some((start_b, end_b))) => {
                let overlapping = start_a < end_b && start_b < end_a;
                // A zero-length window strictly inside another one still clashes.
                let point_inside = (start_a == end_a && start_b < start_a && start_a < end_b)
                    || (start_b == end_b && start_a < start_b && start_b < end_a);
                overlapping || point_inside
            }
            _ => false,
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.tag(), status, self.description)?;
        match self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due_at } => {
                write!(f, " (by: {})", due_at.format(DISPLAY_DATE_TIME_FORMAT))
            }
            TaskKind::Event { starts_at, ends_at } => write!(
                f,
                " (from: {} to: {})",
                starts_at.format(DISPLAY_DATE_TIME_FORMAT),
                ends_at.format(DISPLAY_DATE_TIME_FORMAT)
            ),
        }
    }
}

/// Unvalidated wire shape; deserialization goes through `Task::from_parts`.
#[derive(Deserialize)]
struct TaskRecord {
    description: String,
    is_done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        Task::from_parts(value.description, value.is_done, value.kind)
    }
}
