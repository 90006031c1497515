use chrono::{DateTime, Utc};
use uuid::Uuid;
use waypoint_core::{Goal, GoalCategory, GoalValidationError};

fn datetime(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn goal_new_sets_defaults() {
    let target = datetime("2026-12-31T00:00:00Z");
    let goal = Goal::new("learn rust", "one chapter a week", GoalCategory::Education, target);

    assert!(!goal.id.is_nil());
    assert_eq!(goal.title, "learn rust");
    assert_eq!(goal.category, GoalCategory::Education);
    assert_eq!(goal.target_date, target);
    assert_eq!(goal.progress, 0.0);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Goal::with_id(
        Uuid::nil(),
        "invalid",
        "",
        GoalCategory::Other,
        datetime("2026-12-31T00:00:00Z"),
    )
    .unwrap_err();
    assert_eq!(err, GoalValidationError::NilId);
}

#[test]
fn validate_rejects_blank_title() {
    let mut goal = Goal::new(
        "ok",
        "",
        GoalCategory::Personal,
        datetime("2026-12-31T00:00:00Z"),
    );
    goal.title = " ".to_string();
    assert_eq!(goal.validate().unwrap_err(), GoalValidationError::BlankTitle);
}

#[test]
fn validate_rejects_progress_outside_percentage_range() {
    let mut goal = Goal::new(
        "ok",
        "",
        GoalCategory::Personal,
        datetime("2026-12-31T00:00:00Z"),
    );

    goal.progress = 150.0;
    assert_eq!(
        goal.validate().unwrap_err(),
        GoalValidationError::ProgressOutOfRange(150.0)
    );

    goal.progress = -0.5;
    assert_eq!(
        goal.validate().unwrap_err(),
        GoalValidationError::ProgressOutOfRange(-0.5)
    );

    goal.progress = f64::NAN;
    assert!(matches!(
        goal.validate().unwrap_err(),
        GoalValidationError::ProgressOutOfRange(_)
    ));
}

#[test]
fn goal_serialization_uses_expected_wire_fields() {
    let goal_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut goal = Goal::with_id(
        goal_id,
        "learn rust",
        "one chapter a week",
        GoalCategory::Professional,
        datetime("2026-12-31T00:00:00Z"),
    )
    .unwrap();
    goal.progress = 62.5;
    goal.created_at = datetime("2026-01-15T09:30:00Z");

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["id"], goal_id.to_string());
    assert_eq!(json["title"], "learn rust");
    assert_eq!(json["category"], "Professional");
    assert_eq!(json["target_date"], "2026-12-31T00:00:00Z");
    assert_eq!(json["progress"], 62.5);
    assert_eq!(json["created_at"], "2026-01-15T09:30:00Z");

    let decoded: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, goal);
}
