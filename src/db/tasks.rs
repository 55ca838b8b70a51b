//! SQLite-backed task store.
//!
//! Soft-deleted rows (`deleted_date IS NOT NULL`) are invisible to every
//! operation here: they cannot be found, listed, updated, deleted again or
//! have their status changed. Nothing is ever physically removed.

use super::db::{encode_timestamp, optional_timestamp_column, timestamp_column, Db};
use crate::libs::error::TaskError;
use crate::libs::filter::{Predicate, TaskFilter};
use crate::libs::task::{NewTask, Task, TaskStatus};
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::{params, params_from_iter, OptionalExtension, Row, ToSql};

const INSERT_TASK: &str = "INSERT INTO tasks (user_id, title, description, date, status, created_date, updated_date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    RETURNING id, user_id, title, description, date, status, created_date, updated_date, deleted_date";
const SELECT_TASK_BY_ID: &str = "SELECT id, user_id, title, description, date, status, created_date, updated_date, deleted_date
    FROM tasks WHERE id = ?1 AND deleted_date IS NULL";
const SELECT_TASKS: &str =
    "SELECT id, user_id, title, description, date, status, created_date, updated_date, deleted_date FROM tasks";
const ORDER_NEWEST_FIRST: &str = "ORDER BY created_date DESC, id DESC";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, date = ?4, updated_date = ?5
    WHERE id = ?1 AND deleted_date IS NULL
    RETURNING id, user_id, title, description, date, status, created_date, updated_date, deleted_date";
const SOFT_DELETE_TASK: &str = "UPDATE tasks SET deleted_date = ?2 WHERE id = ?1 AND deleted_date IS NULL";
const UPDATE_TASK_STATUS: &str =
    "UPDATE tasks SET status = ?2, updated_date = max(?3, created_date) WHERE id = ?1 AND deleted_date IS NULL";

/// Persistence operations the task service relies on.
pub trait TaskRepository: Send + Sync {
    /// Inserts a task with status NEW, filling in missing timestamps.
    fn save(&self, task: NewTask) -> Result<Task, TaskError>;

    fn find(&self, id: i64) -> Result<Task, TaskError>;

    /// Live tasks matching `filter`, newest creation first.
    fn find_all_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// Writes title, description, date and `updated_date` of a live task.
    ///
    /// Owner, status and creation time are never touched.
    fn update(&self, task: &Task) -> Result<Task, TaskError>;

    /// Stamps `deleted_date` on a live task.
    fn delete(&self, id: i64) -> Result<(), TaskError>;

    /// Sets status and refreshes `updated_date` on a live task, never to a
    /// time before `created_date`.
    fn update_status(&self, id: i64, status: TaskStatus) -> Result<(), TaskError>;
}

pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: Db) -> Self {
        Tasks { db }
    }
}

impl TaskRepository for Tasks {
    fn save(&self, task: NewTask) -> Result<Task, TaskError> {
        let now = Utc::now();
        let created_date = task.created_date.unwrap_or(now);
        let updated_date = task.updated_date.unwrap_or(now);

        let conn = self.db.conn();
        let saved = conn.query_row(
            INSERT_TASK,
            params![
                task.user_id,
                task.title,
                task.description,
                task.date.as_ref().map(encode_timestamp),
                TaskStatus::New,
                encode_timestamp(&created_date),
                encode_timestamp(&updated_date),
            ],
            task_from_row,
        )?;

        Ok(saved)
    }

    fn find(&self, id: i64) -> Result<Task, TaskError> {
        let conn = self.db.conn();
        conn.query_row(SELECT_TASK_BY_ID, params![id], task_from_row)
            .optional()?
            .ok_or(TaskError::NotFound)
    }

    fn find_all_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        let (conditions, values): (Vec<&str>, Vec<Option<Value>>) =
            filter.predicates().iter().map(condition).unzip();
        let sql = format!("{} WHERE {} {}", SELECT_TASKS, conditions.join(" AND "), ORDER_NEWEST_FIRST);
        let values: Vec<Value> = values.into_iter().flatten().collect();

        let conn = self.db.conn();
        let mut stmt = conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), task_from_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }

        Ok(tasks)
    }

    fn update(&self, task: &Task) -> Result<Task, TaskError> {
        let conn = self.db.conn();
        conn.query_row(
            UPDATE_TASK,
            params![
                task.id,
                task.title,
                task.description,
                task.date.as_ref().map(encode_timestamp),
                encode_timestamp(&task.updated_date),
            ],
            task_from_row,
        )
        .optional()?
        .ok_or(TaskError::NotFound)
    }

    fn delete(&self, id: i64) -> Result<(), TaskError> {
        let conn = self.db.conn();
        let affected = conn.execute(SOFT_DELETE_TASK, params![id, encode_timestamp(&Utc::now())])?;
        if affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }

    fn update_status(&self, id: i64, status: TaskStatus) -> Result<(), TaskError> {
        let conn = self.db.conn();
        let affected = conn.execute(UPDATE_TASK_STATUS, params![id, status, encode_timestamp(&Utc::now())])?;
        if affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }
}

/// SQL condition and its bound value, if any, for one predicate.
fn condition(predicate: &Predicate) -> (&'static str, Option<Value>) {
    match predicate {
        Predicate::OwnedBy(user_id) => ("user_id = ?", Some(Value::Integer(*user_id))),
        Predicate::Live => ("deleted_date IS NULL", None),
        Predicate::StatusIs(status) => ("status = ?", Some(Value::Text(status.as_str().to_string()))),
        Predicate::ScheduledFrom(start) => ("date >= ?", Some(Value::Text(encode_timestamp(start)))),
        Predicate::ScheduledUntil(end) => ("date <= ?", Some(Value::Text(encode_timestamp(end)))),
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        date: optional_timestamp_column(row, 4)?,
        status: row.get(5)?,
        created_date: timestamp_column(row, 6)?,
        updated_date: timestamp_column(row, 7)?,
        deleted_date: optional_timestamp_column(row, 8)?,
    })
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
