//! Display implementation for taskd messages.
//!
//! All message text is defined here so that call sites stay short and the
//! wording stays consistent between the CLI, the logs and the HTTP error
//! bodies.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task {} created", id),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskStatusChanged(id, status) => format!("Task {} moved to {}", id, status),
            Message::TaskNotFound => "record not found".to_string(),
            Message::TaskAccessDenied => "access denied".to_string(),
            Message::TasksNotFoundForUser(name) => format!("No tasks found for user '{}'", name),
            Message::TaskStatusUnconfirmed(id) => {
                format!("status of task {} was updated but the task could not be read back", id)
            }

            // === FILTER / VALIDATION MESSAGES ===
            Message::InvalidPathId(key) => format!("invalid {} parameter(only non-negative integers)", key),
            Message::InvalidStatusFilter => "invalid status filter value".to_string(),
            Message::InvalidStatusValue => "invalid task status value".to_string(),
            Message::InvalidDateFormat => "invalid date format".to_string(),
            Message::TitleRequired => "title is required".to_string(),
            Message::InvalidRequestBody => "invalid request body".to_string(),
            Message::InvalidStatusRequestBody => "invalid request body for status update".to_string(),

            // === USER MESSAGES ===
            Message::UserCreated(name) => format!("User '{}' created", name),
            Message::UserAlreadyExists(name) => format!("User '{}' already exists", name),
            Message::UserNotFound(name) => format!("User '{}' not found", name),
            Message::UserToken(name, token) => format!("API token for '{}': {}", name, token),
            Message::NoUsersFound => "No users found. Create one with `taskd user add <name>`".to_string(),
            Message::MissingCredentials => "user not found".to_string(),
            Message::InvalidCredentials => "invalid credentials".to_string(),

            // === COMPONENT FAILURES ===
            Message::ServiceFailed(operation, error) => format!("TaskService.{}: {}", operation, error),
            Message::ControllerFailed(operation, error) => format!("TaskController.{}: {}", operation, error),
            Message::GateFailed(error) => format!("PathObject: {}", error),
            Message::BlockingTaskFailed(error) => format!("Blocking store call failed: {}", error),
            Message::InternalError => "An internal error occurred".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Listening on http://{}", addr),
            Message::ServerShuttingDown => "Shutdown signal received, draining connections".to_string(),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ShutdownSignalFailed(error) => format!("Failed to listen for shutdown signal: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::PromptSelectModules => "Select the sections to configure".to_string(),
            Message::PromptServerHost => "Host address to bind".to_string(),
            Message::PromptServerPort => "Port to listen on".to_string(),
            Message::PromptDatabasePath => "Path to the SQLite database file".to_string(),
            Message::InvalidEnvValue(var, value) => format!("Ignoring {}='{}': not a valid value", var, value),

            // === DATABASE / MIGRATION MESSAGES ===
            Message::DatabaseOpened(path) => format!("Database opened at {}", path),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", s)
    }
}
