//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Ensure the persisted store exists before first use.
//! - Load and overwrite the flat task sequence.
//!
//! # Invariants
//! - Row `position` is the 0-based list position; reads order by it.
//! - `save_tasks` replaces every row in one transaction.
//! - Each row is validated through `Task::from_parts` on read.

use crate::db::{open_db, DbError};
use crate::model::task::{Task, TaskKind, TaskValidationError};
use chrono::NaiveDateTime;
use log::{error, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// Date-time format used in the `tasks` table.
const STORE_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TASK_SELECT_SQL: &str = "SELECT
    position,
    kind,
    description,
    is_done,
    due_at,
    starts_at,
    ends_at
FROM tasks
ORDER BY position ASC";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for task store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The persisted store does not exist yet.
    Missing(PathBuf),
    Io(std::io::Error),
    Db(DbError),
    /// A stored row cannot be turned back into a task.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "task store not found at `{}`", path.display()),
            Self::Io(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Missing(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Storage collaborator used by the session at startup and shutdown.
pub trait TaskStore {
    /// Ensures the persisted store exists, creating an empty one if absent.
    fn check_store(&self) -> StoreResult<()>;
    /// Returns the persisted task sequence in list order.
    fn read_tasks(&self) -> StoreResult<Vec<Task>>;
    /// Overwrites the persisted state with `tasks`.
    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()>;
}

/// SQLite-backed task store rooted at one database file.
///
/// A connection is opened per operation; the store is only touched at
/// session startup and shutdown.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    path: PathBuf,
}

impl SqliteTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> StoreResult<Connection> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(open_db(&self.path)?)
    }
}

impl TaskStore for SqliteTaskStore {
    fn check_store(&self) -> StoreResult<()> {
        let existed = self.path.exists();
        self.open()?;
        info!("event=store_check module=repo status=ok created={}", !existed);
        Ok(())
    }

    fn read_tasks(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }

        let result = self.open().and_then(|conn| read_all(&conn));
        match &result {
            Ok(tasks) => info!(
                "event=store_read module=repo status=ok rows={} duration_ms={}",
                tasks.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_read module=repo status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.open().and_then(|mut conn| write_all(&mut conn, tasks));
        match &result {
            Ok(()) => info!(
                "event=store_save module=repo status=ok rows={} duration_ms={}",
                tasks.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=repo status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

fn read_all(conn: &Connection) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(TASK_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn write_all(conn: &mut Connection, tasks: &[Task]) -> StoreResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM tasks;", [])?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO tasks (
                position,
                kind,
                description,
                is_done,
                due_at,
                starts_at,
                ends_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        )?;
        for (position, task) in tasks.iter().enumerate() {
            let (due_at, starts_at, ends_at) = match *task.kind() {
                TaskKind::Todo => (None, None, None),
                TaskKind::Deadline { due_at } => (Some(format_date_time(due_at)), None, None),
                TaskKind::Event { starts_at, ends_at } => (
                    None,
                    Some(format_date_time(starts_at)),
                    Some(format_date_time(ends_at)),
                ),
            };
            let position = i64::try_from(position)
                .map_err(|_| StoreError::InvalidData(format!("position {position} overflows")))?;
            insert.execute(params![
                position,
                task.kind().label(),
                task.description(),
                bool_to_int(task.is_done()),
                due_at,
                starts_at,
                ends_at,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let position: i64 = row.get("position")?;
    let kind_text: String = row.get("kind")?;
    let kind = match kind_text.as_str() {
        "todo" => TaskKind::Todo,
        "deadline" => TaskKind::Deadline {
            due_at: required_date_time(row, "due_at", position)?,
        },
        "event" => TaskKind::Event {
            starts_at: required_date_time(row, "starts_at", position)?,
            ends_at: required_date_time(row, "ends_at", position)?,
        },
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid task kind `{other}` at position {position}"
            )));
        }
    };

    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_done value `{other}` at position {position}"
            )));
        }
    };

    let description: String = row.get("description")?;
    Ok(Task::from_parts(description, is_done, kind)?)
}

fn required_date_time(row: &Row<'_>, column: &str, position: i64) -> StoreResult<NaiveDateTime> {
    let text: Option<String> = row.get(column)?;
    let text = text.ok_or_else(|| {
        StoreError::InvalidData(format!("missing {column} at position {position}"))
    })?;
    NaiveDateTime::parse_from_str(&text, STORE_DATE_TIME_FORMAT).map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid {column} value `{text}` at position {position}"
        ))
    })
}

fn format_date_time(value: NaiveDateTime) -> String {
    value.format(STORE_DATE_TIME_FORMAT).to_string()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
