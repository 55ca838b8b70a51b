use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    New,
    InProgress,
    Complete,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::New, TaskStatus::InProgress, TaskStatus::Complete];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::New => "NEW",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the three status names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A persisted task.
///
/// `deleted_date` is only ever `Some` on rows read straight from the table;
/// every store query filters soft-deleted rows out, so tasks handed to the
/// service and the HTTP layer are always live.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub deleted_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Copies the fields a client may change onto this task.
    ///
    /// Status, owner and timestamps are left alone.
    pub fn merge(&mut self, changes: TaskChanges) {
        self.title = changes.title;
        self.description = changes.description;
        self.date = changes.date;
    }
}

/// Client-editable part of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChanges {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// A task that has not been stored yet.
///
/// There is no status field: every new task starts as [`TaskStatus::New`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(user_id: i64, changes: TaskChanges) -> Self {
        NewTask {
            user_id,
            title: changes.title,
            description: changes.description,
            date: changes.date,
            created_date: None,
            updated_date: None,
        }
    }
}
