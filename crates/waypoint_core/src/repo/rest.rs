//! Remote table-store adapter speaking PostgREST-style JSON over HTTP.
//!
//! # Responsibility
//! - Implement both repository contracts against a hosted `tasks`/`goals`
//!   table API using a blocking HTTP agent.
//! - Map transport, status and decode failures into typed errors; the
//!   service layer decides what to surface.
//!
//! # Invariants
//! - Every request carries the `apikey` and bearer authorization headers.
//! - List reads order by `created_at.desc` with `id.asc` tiebreak, matching
//!   the SQLite adapter.
//! - Records are validated before every write, same as the local adapter.

use crate::model::goal::{Goal, GoalId};
use crate::model::task::{Task, TaskId};
use crate::repo::goal_repo::GoalRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the table API base URL, including the REST
/// prefix (e.g. `https://project.example.co/rest/v1`).
pub const ENV_BASE_URL: &str = "WAYPOINT_REST_URL";
/// Environment variable holding the API key used for both auth headers.
pub const ENV_API_KEY: &str = "WAYPOINT_REST_KEY";

/// Remote table-store failure.
#[derive(Debug)]
pub enum RestError {
    MissingConfig(&'static str),
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
}

impl Display for RestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingConfig(name) => {
                write!(f, "missing remote store configuration: set {name}")
            }
            Self::Transport(message) => write!(f, "remote store transport failure: {message}"),
            Self::Status { status, body } => {
                write!(f, "remote store returned status {status}: {body}")
            }
            Self::Decode(message) => write!(f, "undecodable remote store response: {message}"),
        }
    }
}

impl Error for RestError {}

impl From<ureq::Error> for RestError {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                Self::Status { status, body }
            }
            transport => Self::Transport(transport.to_string()),
        }
    }
}

/// Connection settings for the remote table store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestStoreConfig {
    pub base_url: String,
    pub api_key: String,
}

impl RestStoreConfig {
    /// Builds a config, trimming whitespace and trailing slashes off the
    /// base URL so joined table paths stay canonical.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into().trim().to_string(),
        }
    }

    /// Reads connection settings from the environment.
    pub fn from_env() -> Result<Self, RestError> {
        Ok(Self::new(read_env(ENV_BASE_URL)?, read_env(ENV_API_KEY)?))
    }
}

fn read_env(name: &'static str) -> Result<String, RestError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RestError::MissingConfig(name)),
    }
}

/// Remote table store implementing both repository contracts.
pub struct RestStore {
    config: RestStoreConfig,
    agent: ureq::Agent,
}

impl RestStore {
    pub fn new(config: RestStoreConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();
        Self { config, agent }
    }

    /// Builds a store from `WAYPOINT_REST_URL` / `WAYPOINT_REST_KEY`.
    pub fn from_env() -> Result<Self, RestError> {
        Ok(Self::new(RestStoreConfig::from_env()?))
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("apikey", &self.config.api_key)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
    }

    fn list_records<T: DeserializeOwned>(&self, table: &str) -> RepoResult<Vec<T>> {
        let url = format!(
            "{}/{table}?select=*&order=created_at.desc,id.asc",
            self.config.base_url
        );
        let response = self.request("GET", &url).call().map_err(RestError::from)?;
        response
            .into_json()
            .map_err(|err| RestError::Decode(err.to_string()).into())
    }

    fn get_record<T: DeserializeOwned>(&self, table: &str, id: Uuid) -> RepoResult<Option<T>> {
        let url = format!("{}/{table}?select=*&id=eq.{id}", self.config.base_url);
        let response = self.request("GET", &url).call().map_err(RestError::from)?;
        let mut rows: Vec<T> = response
            .into_json()
            .map_err(|err| RestError::Decode(err.to_string()))?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(0)))
    }

    fn insert_record<T: Serialize>(&self, table: &str, record: &T) -> RepoResult<()> {
        // The table API takes inserts as a row array.
        let url = format!("{}/{table}", self.config.base_url);
        self.request("POST", &url)
            .set("Prefer", "return=minimal")
            .send_json(std::slice::from_ref(record))
            .map_err(RestError::from)?;
        Ok(())
    }

    fn replace_record<T: Serialize>(&self, table: &str, id: Uuid, record: &T) -> RepoResult<()> {
        let url = format!("{}/{table}?id=eq.{id}", self.config.base_url);
        let response = self
            .request("PATCH", &url)
            .set("Prefer", "return=representation")
            .send_json(record)
            .map_err(RestError::from)?;
        // An empty representation means the filter matched no row.
        let rows: Vec<serde_json::Value> = response
            .into_json()
            .map_err(|err| RestError::Decode(err.to_string()))?;
        if rows.is_empty() {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn remove_record(&self, table: &str, id: Uuid) -> RepoResult<()> {
        let url = format!("{}/{table}?id=eq.{id}", self.config.base_url);
        self.request("DELETE", &url)
            .set("Prefer", "return=minimal")
            .call()
            .map_err(RestError::from)?;
        Ok(())
    }
}

impl TaskRepository for RestStore {
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        self.insert_record("tasks", task)?;
        Ok(task.id)
    }

    fn replace_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        self.replace_record("tasks", task.id, task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.get_record("tasks", id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.list_records("tasks")
    }

    fn remove_task(&self, id: TaskId) -> RepoResult<()> {
        self.remove_record("tasks", id)
    }
}

impl GoalRepository for RestStore {
    fn insert_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        goal.validate()?;
        self.insert_record("goals", goal)?;
        Ok(goal.id)
    }

    fn replace_goal(&self, goal: &Goal) -> RepoResult<()> {
        goal.validate()?;
        self.replace_record("goals", goal.id, goal)
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        self.get_record("goals", id)
    }

    fn list_goals(&self) -> RepoResult<Vec<Goal>> {
        self.list_records("goals")
    }

    fn remove_goal(&self, id: GoalId) -> RepoResult<()> {
        self.remove_record("goals", id)
    }
}
