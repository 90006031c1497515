//! Goal domain model.
//!
//! # Responsibility
//! - Define the goal record and its fixed category set.
//! - Validate identity and the derived progress range.
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `progress` is derived from linked tasks (0–100); user code never sets
//!   it directly, only the facade writes it back after recomputation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::truncate_to_millis;

/// Stable identifier for a goal.
pub type GoalId = Uuid;

/// Fixed category set for goals. The wire form is the capitalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalCategory {
    Personal,
    Professional,
    Health,
    Financial,
    Education,
    Other,
}

/// A tracked objective with a derived completion percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable global id used for task linkage and replacement by identifier.
    pub id: GoalId,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    /// When the goal should be reached. Persisted with millisecond precision.
    pub target_date: DateTime<Utc>,
    /// Derived percentage of linked tasks that are completed, 0–100.
    pub progress: f64,
    pub created_at: DateTime<Utc>,
}

/// Validation failures for goal records.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalValidationError {
    NilId,
    BlankTitle,
    ProgressOutOfRange(f64),
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "goal id must not be nil"),
            Self::BlankTitle => write!(f, "goal title must not be blank"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "goal progress {value} is outside the 0..=100 range")
            }
        }
    }
}

impl Error for GoalValidationError {}

impl Goal {
    /// Creates a goal with a generated stable id and zero progress.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: GoalCategory,
        target_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            category,
            target_date: truncate_to_millis(target_date),
            progress: 0.0,
            created_at: truncate_to_millis(Utc::now()),
        }
    }

    /// Creates a goal with a caller-provided stable id.
    pub fn with_id(
        id: GoalId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: GoalCategory,
        target_date: DateTime<Utc>,
    ) -> Result<Self, GoalValidationError> {
        if id.is_nil() {
            return Err(GoalValidationError::NilId);
        }
        let mut goal = Self::new(title, description, category, target_date);
        goal.id = id;
        Ok(goal)
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.id.is_nil() {
            return Err(GoalValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::BlankTitle);
        }
        if !self.progress.is_finite() || !(0.0..=100.0).contains(&self.progress) {
            return Err(GoalValidationError::ProgressOutOfRange(self.progress));
        }
        Ok(())
    }
}
