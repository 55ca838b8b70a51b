//! Typed errors shared by the store, the service and the ownership gate.
//!
//! The store and the service return the same [`TaskError`] value; nothing in
//! between wraps or translates it. Only the HTTP layer decides what a client
//! gets to see.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// No live row matches. Soft-deleted rows count as missing.
    #[error("record not found")]
    NotFound,

    /// The status write went through but the task could not be read back.
    #[error("status of task {0} was updated but the task could not be read back")]
    StatusUnconfirmed(i64),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound)
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Malformed client input, rejected before it reaches the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: vec![FieldError::new(field, message.clone())],
            message,
        }
    }
}
