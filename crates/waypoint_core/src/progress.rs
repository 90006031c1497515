//! Goal progress aggregation.
//!
//! # Responsibility
//! - Compute a goal's completion percentage from the full task collection.
//!
//! # Invariants
//! - Pure and deterministic; no side effects.
//! - A goal with no linked tasks has progress 0.

use crate::model::goal::GoalId;
use crate::model::task::Task;

/// Completion percentage of the tasks linked to `goal_id`.
///
/// Scans `tasks` for records whose goal reference matches and returns
/// `100 × completed / total`, or `0.0` when no task links to the goal.
/// The value is not rounded.
pub fn goal_progress(goal_id: GoalId, tasks: &[Task]) -> f64 {
    let mut total = 0u32;
    let mut completed = 0u32;
    for task in tasks.iter().filter(|task| task.goal_id == Some(goal_id)) {
        total += 1;
        if task.completed {
            completed += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total) * 100.0
    }
}
