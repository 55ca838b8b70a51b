use chrono::{DateTime, Utc};

/// An API client. Requests authenticate as a user through its token.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub token: String,
    pub created_date: DateTime<Utc>,
}
