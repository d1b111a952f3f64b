use chrono::NaiveDateTime;
use taskbot_core::{Task, TaskKind, TaskValidationError};

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H%M").unwrap()
}

#[test]
fn constructors_start_not_done() {
    let todo = Task::todo("read book").unwrap();
    let deadline = Task::deadline("submit report", at("2024-12-01 1800"));
    let event = Task::event("meeting", at("2024-12-01 0900"), at("2024-12-01 1000"));

    for task in [&todo, &deadline, &event] {
        assert!(!task.is_done());
    }
    assert_eq!(todo.kind(), &TaskKind::Todo);
    assert_eq!(
        deadline.kind(),
        &TaskKind::Deadline {
            due_at: at("2024-12-01 1800")
        }
    );
    assert_eq!(
        event.window(),
        Some((at("2024-12-01 0900"), at("2024-12-01 1000")))
    );
}

#[test]
fn from_parts_applies_todo_validation() {
    let err = Task::from_parts("", true, TaskKind::Todo).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);

    let done = Task::from_parts("ship", true, TaskKind::Todo).unwrap();
    assert!(done.is_done());
}

#[test]
fn serialization_uses_kind_tag_and_flat_fields() {
    let mut task = Task::deadline("submit report", at("2024-12-01 1800"));
    task.mark();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["kind"], "deadline");
    assert_eq!(json["description"], "submit report");
    assert_eq!(json["is_done"], true);
    assert_eq!(json["due_at"], "2024-12-01T18:00:00");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_rejects_empty_todo_description() {
    let value = serde_json::json!({
        "kind": "todo",
        "description": "",
        "is_done": false
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("description cannot be empty"),
        "unexpected error: {err}"
    );
}
