//! Tracker use-case facade.
//!
//! # Responsibility
//! - Own the in-memory task and goal collections handed to presentation
//!   code.
//! - Trigger goal progress recomputation after task mutations that carry a
//!   goal reference.
//!
//! # Invariants
//! - Every successful mutation refreshes the full affected collection from
//!   the adapter; there is no incremental patching.
//! - Storage failures are logged and swallowed here: callers never see an
//!   error, and a failed write skips the refresh and progress steps, leaving
//!   in-memory state as it was until the next successful fetch.
//! - When a task moves from goal A to goal B, only B is recomputed. A keeps
//!   its stored progress until one of its own tasks is touched again.

use crate::model::goal::{Goal, GoalId};
use crate::model::task::{Task, TaskId};
use crate::progress::goal_progress;
use crate::repo::goal_repo::GoalRepository;
use crate::repo::task_repo::TaskRepository;
use log::{error, info};

/// Data-access facade over one task adapter and one goal adapter.
///
/// Generic over the repository contracts so the SQLite and remote adapters
/// are interchangeable underneath one call surface.
pub struct TrackerService<T: TaskRepository, G: GoalRepository> {
    task_repo: T,
    goal_repo: G,
    tasks: Vec<Task>,
    goals: Vec<Goal>,
}

impl<T: TaskRepository, G: GoalRepository> TrackerService<T, G> {
    /// Creates a facade with empty collections; call [`Self::refresh`] to
    /// load state from the adapters.
    pub fn new(task_repo: T, goal_repo: G) -> Self {
        Self {
            task_repo,
            goal_repo,
            tasks: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Reloads both collections from the adapters.
    pub fn refresh(&mut self) {
        self.refresh_tasks();
        self.refresh_goals();
    }

    /// Current task collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current goal collection, newest first.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Tasks linked to `goal_id`, by reverse scan of the task collection.
    pub fn tasks_by_goal(&self, goal_id: GoalId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.goal_id == Some(goal_id))
            .collect()
    }

    pub fn add_task(&mut self, task: Task) {
        if let Err(err) = self.task_repo.insert_task(&task) {
            error!(
                "event=task_add module=service status=error task_id={} error={err}",
                task.id
            );
            return;
        }
        info!(
            "event=task_add module=service status=ok task_id={}",
            task.id
        );
        self.refresh_tasks();
        if let Some(goal_id) = task.goal_id {
            self.recompute_goal_progress(goal_id);
        }
    }

    pub fn update_task(&mut self, task: Task) {
        if let Err(err) = self.task_repo.replace_task(&task) {
            error!(
                "event=task_update module=service status=error task_id={} error={err}",
                task.id
            );
            return;
        }
        info!(
            "event=task_update module=service status=ok task_id={}",
            task.id
        );
        self.refresh_tasks();
        if let Some(goal_id) = task.goal_id {
            self.recompute_goal_progress(goal_id);
        }
    }

    pub fn delete_task(&mut self, task_id: TaskId) {
        // The goal reference must be captured before the row disappears.
        let goal_id = self
            .tasks
            .iter()
            .find(|task| task.id == task_id)
            .and_then(|task| task.goal_id);

        if let Err(err) = self.task_repo.remove_task(task_id) {
            error!(
                "event=task_delete module=service status=error task_id={task_id} error={err}"
            );
            return;
        }
        info!("event=task_delete module=service status=ok task_id={task_id}");
        self.refresh_tasks();
        if let Some(goal_id) = goal_id {
            self.recompute_goal_progress(goal_id);
        }
    }

    pub fn add_goal(&mut self, goal: Goal) {
        if let Err(err) = self.goal_repo.insert_goal(&goal) {
            error!(
                "event=goal_add module=service status=error goal_id={} error={err}",
                goal.id
            );
            return;
        }
        info!(
            "event=goal_add module=service status=ok goal_id={}",
            goal.id
        );
        self.refresh_goals();
    }

    pub fn update_goal(&mut self, goal: Goal) {
        if let Err(err) = self.goal_repo.replace_goal(&goal) {
            error!(
                "event=goal_update module=service status=error goal_id={} error={err}",
                goal.id
            );
            return;
        }
        info!(
            "event=goal_update module=service status=ok goal_id={}",
            goal.id
        );
        self.refresh_goals();
    }

    pub fn delete_goal(&mut self, goal_id: GoalId) {
        if let Err(err) = self.goal_repo.remove_goal(goal_id) {
            error!("event=goal_delete module=service status=error goal_id={goal_id} error={err}");
            return;
        }
        info!("event=goal_delete module=service status=ok goal_id={goal_id}");
        self.refresh_goals();
    }

    /// Recomputes one goal's progress from the refreshed task collection and
    /// writes the full record back.
    ///
    /// A goal id with no surviving record is a dangling task reference;
    /// recomputation for it is a silent no-op.
    fn recompute_goal_progress(&mut self, goal_id: GoalId) {
        let progress = goal_progress(goal_id, &self.tasks);

        let goal = match self.goal_repo.get_goal(goal_id) {
            Ok(Some(goal)) => goal,
            Ok(None) => return,
            Err(err) => {
                error!(
                    "event=goal_progress module=service status=error goal_id={goal_id} error={err}"
                );
                return;
            }
        };

        let updated = Goal { progress, ..goal };
        if let Err(err) = self.goal_repo.replace_goal(&updated) {
            error!(
                "event=goal_progress module=service status=error goal_id={goal_id} error={err}"
            );
            return;
        }
        info!(
            "event=goal_progress module=service status=ok goal_id={goal_id} progress={progress}"
        );
        self.refresh_goals();
    }

    fn refresh_tasks(&mut self) {
        match self.task_repo.list_tasks() {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => error!("event=task_list module=service status=error error={err}"),
        }
    }

    fn refresh_goals(&mut self) {
        match self.goal_repo.list_goals() {
            Ok(goals) => self.goals = goals,
            Err(err) => error!("event=goal_list module=service status=error error={err}"),
        }
    }
}
