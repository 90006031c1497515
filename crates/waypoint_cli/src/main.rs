//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `waypoint_core` end to end against a local store.
//! - Keep output deterministic for quick local sanity checks.

use waypoint_core::db::open_db;
use waypoint_core::{SqliteGoalRepository, SqliteTaskRepository, TrackerService};

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "waypoint.db".to_string());

    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open store at `{path}`: {err}");
            std::process::exit(1);
        }
    };

    let task_repo = match SqliteTaskRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("task store not ready: {err}");
            std::process::exit(1);
        }
    };
    let goal_repo = match SqliteGoalRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("goal store not ready: {err}");
            std::process::exit(1);
        }
    };

    let mut service = TrackerService::new(task_repo, goal_repo);
    service.refresh();

    println!("waypoint_core version={}", waypoint_core::core_version());
    println!(
        "store={path} tasks={} goals={}",
        service.tasks().len(),
        service.goals().len()
    );
    for goal in service.goals() {
        println!(
            "goal {} [{:?}] progress={:.0}%",
            goal.title, goal.category, goal.progress
        );
    }
    for task in service.tasks() {
        println!(
            "task {} priority={:?} completed={} due={}",
            task.title,
            task.priority,
            task.completed,
            task.due_date.date_naive()
        );
    }
}
