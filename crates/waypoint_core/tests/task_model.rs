use chrono::{DateTime, Utc};
use uuid::Uuid;
use waypoint_core::{Priority, SubTask, Task, TaskValidationError};

fn datetime(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn task_new_sets_defaults() {
    let due = datetime("2026-09-01T12:00:00Z");
    let task = Task::new("write report", "quarterly numbers", Priority::High, due);

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "write report");
    assert_eq!(task.description, "quarterly numbers");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date, due);
    assert!(!task.completed);
    assert_eq!(task.goal_id, None);
    assert!(task.subtasks.is_empty());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(
        Uuid::nil(),
        "invalid",
        "",
        Priority::Low,
        datetime("2026-09-01T12:00:00Z"),
    )
    .unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn validate_rejects_blank_title() {
    let mut task = Task::new("ok", "", Priority::Medium, datetime("2026-09-01T12:00:00Z"));
    task.title = "   ".to_string();
    assert_eq!(task.validate().unwrap_err(), TaskValidationError::BlankTitle);
}

#[test]
fn validate_rejects_nil_goal_reference() {
    let mut task = Task::new("ok", "", Priority::Medium, datetime("2026-09-01T12:00:00Z"));
    task.goal_id = Some(Uuid::nil());
    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::NilGoalReference
    );
}

#[test]
fn validate_rejects_duplicate_subtask_ids() {
    let mut task = Task::new("ok", "", Priority::Medium, datetime("2026-09-01T12:00:00Z"));
    let subtask = SubTask::new("outline");
    task.subtasks.push(subtask.clone());
    task.subtasks.push(subtask.clone());

    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::DuplicateSubtaskId(subtask.id)
    );
}

#[test]
fn validate_rejects_blank_subtask_title() {
    let mut task = Task::new("ok", "", Priority::Medium, datetime("2026-09-01T12:00:00Z"));
    let mut subtask = SubTask::new("outline");
    subtask.title = String::new();
    let subtask_id = subtask.id;
    task.subtasks.push(subtask);

    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::BlankSubtaskTitle(subtask_id)
    );
}

#[test]
fn subtask_completion_stays_independent_of_task_completion() {
    let mut task = Task::new("ship", "", Priority::High, datetime("2026-09-01T12:00:00Z"));
    let mut subtask = SubTask::new("draft");
    subtask.completed = true;
    task.subtasks.push(subtask);

    task.validate().unwrap();
    assert!(!task.completed);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let goal_id = Uuid::parse_str("66666666-7777-4888-8999-aaaaaaaaaaaa").unwrap();
    let mut task = Task::with_id(
        task_id,
        "write report",
        "quarterly numbers",
        Priority::High,
        datetime("2026-09-01T12:00:00Z"),
    )
    .unwrap();
    task.goal_id = Some(goal_id);
    task.created_at = datetime("2026-01-15T09:30:00Z");
    let subtask = SubTask::new("outline");
    let subtask_id = subtask.id;
    task.subtasks.push(subtask);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["title"], "write report");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["due_date"], "2026-09-01T12:00:00Z");
    assert_eq!(json["completed"], false);
    assert_eq!(json["goal_id"], goal_id.to_string());
    assert_eq!(json["created_at"], "2026-01-15T09:30:00Z");
    assert_eq!(json["subtasks"][0]["id"], subtask_id.to_string());
    assert_eq!(json["subtasks"][0]["title"], "outline");
    assert_eq!(json["subtasks"][0]["completed"], false);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn unlinked_task_serializes_goal_reference_as_null() {
    let task = Task::new("solo", "", Priority::Low, datetime("2026-09-01T12:00:00Z"));
    let json = serde_json::to_value(&task).unwrap();
    assert!(json["goal_id"].is_null());
}
