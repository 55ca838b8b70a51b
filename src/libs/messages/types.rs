/// Every user-facing and log message in taskd.
///
/// Text lives in `display.rs`; call sites only pick a variant.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskStatusChanged(i64, String), // id, status
    TaskNotFound,
    TaskAccessDenied,
    TasksNotFoundForUser(String),
    TaskStatusUnconfirmed(i64),

    // === FILTER / VALIDATION MESSAGES ===
    InvalidPathId(String), // parameter name
    InvalidStatusFilter,
    InvalidStatusValue,
    InvalidDateFormat,
    TitleRequired,
    InvalidRequestBody,
    InvalidStatusRequestBody,

    // === USER MESSAGES ===
    UserCreated(String),         // name
    UserAlreadyExists(String),   // name
    UserNotFound(String),        // name
    UserToken(String, String),   // name, token
    NoUsersFound,
    MissingCredentials,
    InvalidCredentials,

    // === COMPONENT FAILURES (logged, never sent to clients) ===
    ServiceFailed(&'static str, String),    // operation, error
    ControllerFailed(&'static str, String), // operation, error
    GateFailed(String),                     // error
    BlockingTaskFailed(String),
    InternalError,

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerShuttingDown,
    ServerStopped,
    ShutdownSignalFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    ConfigModuleDatabase,
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptDatabasePath,
    InvalidEnvValue(String, String), // variable, value

    // === DATABASE / MIGRATION MESSAGES ===
    DatabaseOpened(String), // path
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    DatabaseVersion(u32),
    MigrationHistory,
}
