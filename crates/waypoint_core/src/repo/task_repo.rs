//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `tasks` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Subtasks are stored as a JSON column owned by the task row.
//! - `replace_task` of a missing id is `NotFound`; `remove_task` of a
//!   missing id succeeds (delete is idempotent).

use crate::model::task::{Priority, SubTask, Task, TaskId};
use crate::repo::{
    bool_to_int, datetime_to_db, ensure_table_ready, parse_bool, parse_datetime, parse_uuid,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    priority,
    due_date,
    completed,
    goal_id,
    subtasks,
    created_at
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "priority",
    "due_date",
    "completed",
    "goal_id",
    "subtasks",
    "created_at",
];

/// Repository interface for task persistence.
pub trait TaskRepository {
    /// Inserts one task and returns its stable id.
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Replaces the full record identified by `task.id`.
    fn replace_task(&self, task: &Task) -> RepoResult<()>;
    /// Gets one task by id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists all tasks, newest first.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Removes one task by id. Removing an absent id is a no-op.
    fn remove_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                priority,
                due_date,
                completed,
                goal_id,
                subtasks,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                priority_to_db(task.priority),
                datetime_to_db(task.due_date),
                bool_to_int(task.completed),
                task.goal_id.map(|goal_id| goal_id.to_string()),
                subtasks_to_db(&task.subtasks)?,
                datetime_to_db(task.created_at),
            ],
        )?;

        Ok(task.id)
    }

    fn replace_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                priority = ?3,
                due_date = ?4,
                completed = ?5,
                goal_id = ?6,
                subtasks = ?7,
                created_at = ?8
             WHERE id = ?9;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                priority_to_db(task.priority),
                datetime_to_db(task.due_date),
                bool_to_int(task.completed),
                task.goal_id.map(|goal_id| goal_id.to_string()),
                subtasks_to_db(&task.subtasks)?,
                datetime_to_db(task.created_at),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at DESC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn remove_task(&self, id: TaskId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "tasks.id")?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let goal_id = match row.get::<_, Option<String>>("goal_id")? {
        Some(text) => Some(parse_uuid(&text, "tasks.goal_id")?),
        None => None,
    };

    let due_date_text: String = row.get("due_date")?;
    let created_at_text: String = row.get("created_at")?;
    let subtasks_text: String = row.get("subtasks")?;

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
        due_date: parse_datetime(&due_date_text, "tasks.due_date")?,
        completed: parse_bool(row.get("completed")?, "tasks.completed")?,
        goal_id,
        subtasks: subtasks_from_db(&subtasks_text)?,
        created_at: parse_datetime(&created_at_text, "tasks.created_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn subtasks_to_db(subtasks: &[SubTask]) -> RepoResult<String> {
    serde_json::to_string(subtasks)
        .map_err(|err| RepoError::InvalidData(format!("unserializable subtasks: {err}")))
}

fn subtasks_from_db(text: &str) -> RepoResult<Vec<SubTask>> {
    serde_json::from_str(text)
        .map_err(|err| RepoError::InvalidData(format!("invalid subtasks json: {err}")))
}
