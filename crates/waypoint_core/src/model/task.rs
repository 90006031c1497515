//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its owned subtask checklist.
//! - Validate identity and linkage invariants before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Subtasks live and die with their parent task; they have no lifecycle of
//!   their own.
//! - `completed` and subtask completion are independent booleans, both
//!   user-controlled. Finishing every subtask does not finish the task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::goal::GoalId;
use crate::model::truncate_to_millis;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Identifier for a subtask, unique within its parent task.
pub type SubTaskId = Uuid;

/// Urgency bucket for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Checklist item owned exclusively by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: String,
    pub completed: bool,
}

impl SubTask {
    /// Creates an open subtask with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
        }
    }
}

/// A unit of work with priority, due date, completion state and an optional
/// goal link.
///
/// The goal link is a weak relation: it is a nullable identifier used for
/// reverse lookup only. Deleting the referenced goal leaves the task in
/// place with a dangling reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global id used for linking and replacement by identifier.
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// When the task is due. Persisted with millisecond precision.
    pub due_date: DateTime<Utc>,
    /// User-controlled completion flag, independent of subtask state.
    pub completed: bool,
    /// Optional weak reference to a goal this task counts toward.
    pub goal_id: Option<GoalId>,
    /// Ordered checklist owned by this task.
    pub subtasks: Vec<SubTask>,
    pub created_at: DateTime<Utc>,
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    BlankTitle,
    NilGoalReference,
    NilSubtaskId,
    BlankSubtaskTitle(SubTaskId),
    DuplicateSubtaskId(SubTaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::NilGoalReference => write!(f, "task goal reference must not be nil"),
            Self::NilSubtaskId => write!(f, "subtask id must not be nil"),
            Self::BlankSubtaskTitle(id) => write!(f, "subtask {id} title must not be blank"),
            Self::DuplicateSubtaskId(id) => write!(f, "duplicate subtask id {id}"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates an open, unlinked task with a generated stable id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            priority,
            due_date: truncate_to_millis(due_date),
            completed: false,
            goal_id: None,
            subtasks: Vec::new(),
            created_at: truncate_to_millis(Utc::now()),
        }
    }

    /// Creates a task with a caller-provided stable id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let mut task = Self::new(title, description, priority, due_date);
        task.id = id;
        Ok(task)
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.goal_id.is_some_and(|goal_id| goal_id.is_nil()) {
            return Err(TaskValidationError::NilGoalReference);
        }
        let mut seen = HashSet::new();
        for subtask in &self.subtasks {
            if subtask.id.is_nil() {
                return Err(TaskValidationError::NilSubtaskId);
            }
            if subtask.title.trim().is_empty() {
                return Err(TaskValidationError::BlankSubtaskTitle(subtask.id));
            }
            if !seen.insert(subtask.id) {
                return Err(TaskValidationError::DuplicateSubtaskId(subtask.id));
            }
        }
        Ok(())
    }
}
