use chrono::NaiveDateTime;
use taskbot_core::db::open_db;
use taskbot_core::{Session, SqliteTaskStore, StoreError, Task, TaskStore};

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H%M").unwrap()
}

fn sample_tasks() -> Vec<Task> {
    let mut deadline = Task::deadline("submit report", at("2024-12-01 1800"));
    deadline.mark();
    vec![
        Task::todo("read book").unwrap(),
        deadline,
        Task::event("meeting", at("2024-12-01 0900"), at("2024-12-01 1000")),
    ]
}

#[test]
fn check_store_creates_missing_file_and_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tasks.sqlite3");
    let store = SqliteTaskStore::new(&path);

    store.check_store().unwrap();
    assert!(path.exists());
    assert!(store.read_tasks().unwrap().is_empty());
}

#[test]
fn read_without_store_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteTaskStore::new(dir.path().join("absent.sqlite3"));

    let err = store.read_tasks().unwrap_err();
    assert!(matches!(err, StoreError::Missing(_)));
}

#[test]
fn save_then_read_round_trips_variants_order_and_done_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteTaskStore::new(dir.path().join("tasks.sqlite3"));
    let tasks = sample_tasks();

    store.save_tasks(&tasks).unwrap();
    assert_eq!(store.read_tasks().unwrap(), tasks);
}

#[test]
fn save_overwrites_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteTaskStore::new(dir.path().join("tasks.sqlite3"));

    store.save_tasks(&sample_tasks()).unwrap();
    let shorter = vec![Task::todo("only one").unwrap()];
    store.save_tasks(&shorter).unwrap();

    assert_eq!(store.read_tasks().unwrap(), shorter);
}

#[test]
fn corrupt_rows_are_rejected_as_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let store = SqliteTaskStore::new(&path);
    store.check_store().unwrap();

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO tasks (position, kind, description, is_done, due_at)
         VALUES (0, 'deadline', 'no date', 0, NULL);",
        [],
    )
    .unwrap();
    drop(conn);

    let err = store.read_tasks().unwrap_err();
    assert!(
        matches!(&err, StoreError::InvalidData(message) if message.contains("due_at")),
        "unexpected error: {err}"
    );
}

#[test]
fn session_bye_persists_and_next_session_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let mut first = Session::open(SqliteTaskStore::new(&path));
    assert!(first.loading_error().is_none());
    first.respond("todo read book");
    first.respond("event meeting from 2024-12-01 0900 to 2024-12-01 1000");
    first.respond("mark 1");
    assert!(first.respond("bye").is_exit());

    let second = Session::open(SqliteTaskStore::new(&path));
    assert_eq!(second.tasks(), first.tasks());
    assert!(second.tasks().tasks()[0].is_done());
}

#[test]
fn corrupt_store_starts_session_with_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    std::fs::write(&path, b"definitely not sqlite").unwrap();

    let session = Session::open(SqliteTaskStore::new(&path));
    assert!(session.loading_error().is_some());
    assert!(session.tasks().is_empty());
}
