//! Request bodies and query strings, and their validation into domain values.

use crate::db::db::is_storable;
use crate::libs::error::ValidationError;
use crate::libs::messages::Message;
use crate::libs::task::{TaskChanges, TaskStatus};
use chrono::DateTime;
use serde::Deserialize;

/// Body of `POST /tasks` and `PUT /tasks/{taskId}`.
///
/// `date` is unix seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<i64>,
}

impl TaskRequest {
    pub fn into_changes(self) -> Result<TaskChanges, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::single("title", Message::TitleRequired.to_string()));
        }

        let date = match self.date {
            Some(secs) => Some(
                DateTime::from_timestamp(secs, 0)
                    .filter(is_storable)
                    .ok_or_else(|| ValidationError::single("date", Message::InvalidDateFormat.to_string()))?,
            ),
            None => None,
        };

        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            date,
        })
    }
}

/// Body of `PUT /tasks/{taskId}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatusRequest {
    #[serde(default)]
    pub status: String,
}

impl UpdateTaskStatusRequest {
    pub fn status(&self) -> Result<TaskStatus, ValidationError> {
        self.status
            .parse()
            .map_err(|_| ValidationError::single("status", Message::InvalidStatusValue.to_string()))
    }
}

/// Query string of `GET /tasks`. Both values are validated by the filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn blank_title_is_rejected() {
        let request = TaskRequest {
            title: "   ".to_string(),
            description: None,
            date: None,
        };
        let err = request.into_changes().unwrap_err();
        assert_eq!(err.errors[0].field, "title");
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn date_is_read_as_unix_seconds() {
        let request: TaskRequest =
            serde_json::from_str(r#"{"title":"Buy milk","date":1710460800}"#).unwrap();
        let changes = request.into_changes().unwrap();
        assert_eq!(changes.date, Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()));
        assert_eq!(changes.description, None);
    }

    #[test]
    fn unrepresentable_date_is_rejected() {
        let request = TaskRequest {
            title: "x".to_string(),
            description: None,
            date: Some(i64::MAX),
        };
        assert_eq!(request.into_changes().unwrap_err().errors[0].field, "date");
    }

    #[test]
    fn dates_beyond_year_9999_are_rejected() {
        for secs in [253402300800, -62167219201] {
            let request = TaskRequest {
                title: "x".to_string(),
                description: None,
                date: Some(secs),
            };
            assert_eq!(request.into_changes().unwrap_err().errors[0].field, "date", "{secs}");
        }

        let last_second = TaskRequest {
            title: "x".to_string(),
            description: None,
            date: Some(253402300799),
        };
        assert!(last_second.into_changes().is_ok());
    }

    #[test]
    fn status_request_accepts_only_known_names() {
        let ok = UpdateTaskStatusRequest {
            status: "IN_PROGRESS".to_string(),
        };
        assert_eq!(ok.status(), Ok(TaskStatus::InProgress));

        let bad = UpdateTaskStatusRequest {
            status: "DONE".to_string(),
        };
        assert_eq!(bad.status().unwrap_err().message, "invalid task status value");
    }
}
