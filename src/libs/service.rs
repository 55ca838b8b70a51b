//! Business rules around the task store.
//!
//! The service owns timestamping: it stamps creation and update times before
//! handing rows to the store. Store errors are logged with the failing
//! operation and returned as they are.

use super::access::Findable;
use super::error::TaskError;
use super::filter::TaskFilter;
use super::messages::Message;
use super::task::{NewTask, Task, TaskStatus};
use crate::db::tasks::TaskRepository;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        TaskService { repo }
    }

    pub fn save(&self, mut task: NewTask) -> Result<Task, TaskError> {
        let now = Utc::now();
        let created_date = *task.created_date.get_or_insert(now);
        task.updated_date = Some(now.max(created_date));

        self.repo.save(task).inspect_err(|e| log_failure("save", e))
    }

    pub fn find(&self, id: i64) -> Result<Task, TaskError> {
        self.repo.find(id).inspect_err(|e| log_failure("find", e))
    }

    pub fn find_all(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        self.repo.find_all_tasks(filter).inspect_err(|e| log_failure("find_all", e))
    }

    /// Refreshes `updated_date` and writes the task.
    ///
    /// Callers merge client changes into a fetched task first (see
    /// [`Task::merge`]); status and owner are not written on this path.
    pub fn update(&self, mut task: Task) -> Result<Task, TaskError> {
        task.updated_date = Utc::now().max(task.created_date);
        self.repo.update(&task).inspect_err(|e| log_failure("update", e))
    }

    pub fn delete(&self, id: i64) -> Result<(), TaskError> {
        self.repo.delete(id).inspect_err(|e| log_failure("delete", e))
    }

    /// Writes the new status, then reads the task back.
    ///
    /// The two steps are not atomic. If the write succeeds and the task is
    /// gone by the time it is read back (a concurrent delete), the result is
    /// [`TaskError::StatusUnconfirmed`] rather than a plain not-found.
    pub fn update_status(&self, id: i64, status: TaskStatus) -> Result<Task, TaskError> {
        self.repo
            .update_status(id, status)
            .inspect_err(|e| log_failure("update_status", e))?;

        match self.repo.find(id) {
            Ok(task) => Ok(task),
            Err(TaskError::NotFound) => {
                let err = TaskError::StatusUnconfirmed(id);
                log_failure("update_status(find after update)", &err);
                Err(err)
            }
            Err(e) => {
                log_failure("update_status(find after update)", &e);
                Err(e)
            }
        }
    }
}

impl Findable for TaskService {
    type Object = Task;

    fn find(&self, id: i64) -> Result<Task, TaskError> {
        TaskService::find(self, id)
    }
}

fn log_failure(operation: &'static str, error: &TaskError) {
    if error.is_not_found() {
        tracing::debug!("{}", Message::ServiceFailed(operation, error.to_string()));
    } else {
        tracing::error!("{}", Message::ServiceFailed(operation, error.to_string()));
    }
}
