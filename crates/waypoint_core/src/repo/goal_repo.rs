//! Goal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `goals` table.
//!
//! # Invariants
//! - Write paths call `Goal::validate()` before SQL mutations, so a derived
//!   progress outside 0–100 never reaches storage.
//! - `replace_goal` of a missing id is `NotFound`; `remove_goal` of a
//!   missing id succeeds (delete is idempotent).

use crate::model::goal::{Goal, GoalCategory, GoalId};
use crate::repo::{
    datetime_to_db, ensure_table_ready, parse_datetime, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const GOAL_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    target_date,
    progress,
    created_at
FROM goals";

const GOAL_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "category",
    "target_date",
    "progress",
    "created_at",
];

/// Repository interface for goal persistence.
pub trait GoalRepository {
    /// Inserts one goal and returns its stable id.
    fn insert_goal(&self, goal: &Goal) -> RepoResult<GoalId>;
    /// Replaces the full record identified by `goal.id`.
    fn replace_goal(&self, goal: &Goal) -> RepoResult<()>;
    /// Gets one goal by id.
    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>>;
    /// Lists all goals, newest first.
    fn list_goals(&self) -> RepoResult<Vec<Goal>>;
    /// Removes one goal by id. Removing an absent id is a no-op.
    ///
    /// Linked tasks are not cascaded; they keep a dangling reference.
    fn remove_goal(&self, id: GoalId) -> RepoResult<()>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "goals", GOAL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn insert_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        goal.validate()?;

        self.conn.execute(
            "INSERT INTO goals (
                id,
                title,
                description,
                category,
                target_date,
                progress,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                goal.id.to_string(),
                goal.title.as_str(),
                goal.description.as_str(),
                category_to_db(goal.category),
                datetime_to_db(goal.target_date),
                goal.progress,
                datetime_to_db(goal.created_at),
            ],
        )?;

        Ok(goal.id)
    }

    fn replace_goal(&self, goal: &Goal) -> RepoResult<()> {
        goal.validate()?;

        let changed = self.conn.execute(
            "UPDATE goals
             SET
                title = ?1,
                description = ?2,
                category = ?3,
                target_date = ?4,
                progress = ?5,
                created_at = ?6
             WHERE id = ?7;",
            params![
                goal.title.as_str(),
                goal.description.as_str(),
                category_to_db(goal.category),
                datetime_to_db(goal.target_date),
                goal.progress,
                datetime_to_db(goal.created_at),
                goal.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(goal.id));
        }

        Ok(())
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    fn list_goals(&self) -> RepoResult<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} ORDER BY created_at DESC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(parse_goal_row(row)?);
        }

        Ok(goals)
    }

    fn remove_goal(&self, id: GoalId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM goals WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

fn parse_goal_row(row: &Row<'_>) -> RepoResult<Goal> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "goals.id")?;

    let category_text: String = row.get("category")?;
    let category = parse_category(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in goals.category"
        ))
    })?;

    let target_date_text: String = row.get("target_date")?;
    let created_at_text: String = row.get("created_at")?;

    let goal = Goal {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        category,
        target_date: parse_datetime(&target_date_text, "goals.target_date")?,
        progress: row.get("progress")?,
        created_at: parse_datetime(&created_at_text, "goals.created_at")?,
    };
    goal.validate()?;
    Ok(goal)
}

fn category_to_db(category: GoalCategory) -> &'static str {
    match category {
        GoalCategory::Personal => "Personal",
        GoalCategory::Professional => "Professional",
        GoalCategory::Health => "Health",
        GoalCategory::Financial => "Financial",
        GoalCategory::Education => "Education",
        GoalCategory::Other => "Other",
    }
}

fn parse_category(value: &str) -> Option<GoalCategory> {
    match value {
        "Personal" => Some(GoalCategory::Personal),
        "Professional" => Some(GoalCategory::Professional),
        "Health" => Some(GoalCategory::Health),
        "Financial" => Some(GoalCategory::Financial),
        "Education" => Some(GoalCategory::Education),
        "Other" => Some(GoalCategory::Other),
        _ => None,
    }
}
