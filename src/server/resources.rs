use crate::libs::task::{Task, TaskStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Wire form of a task. `date` is unix seconds; the audit timestamps are
/// RFC 3339 with nanoseconds. The deletion marker is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<i64>,
    pub status: TaskStatus,
    pub created_date: String,
    pub updated_date: String,
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        TaskDto {
            id: task.id,
            user_id: task.user_id,
            date: task.date.map(|d| d.timestamp()),
            status: task.status,
            created_date: rfc3339(&task.created_date),
            updated_date: rfc3339(&task.updated_date),
            title: task.title,
            description: task.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn task_renders_wire_fields() {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let task = Task {
            id: 3,
            user_id: 7,
            title: "Buy milk".to_string(),
            description: None,
            date: Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()),
            status: TaskStatus::New,
            created_date: created,
            updated_date: created,
            deleted_date: None,
        };

        let json = serde_json::to_value(TaskDto::from(task)).unwrap();
        assert_eq!(json["date"], 1710460800);
        assert_eq!(json["status"], "NEW");
        assert_eq!(json["created_date"], "2024-03-15T09:30:00.000000000Z");
        assert!(json.get("deleted_date").is_none());
    }
}
