//! Persistence layer on top of SQLite.
//!
//! ```rust,no_run
//! use taskd::db::{db::Db, tasks::{TaskRepository, Tasks}, users::Users};
//! use taskd::libs::filter::TaskFilter;
//!
//! let db = Db::new()?;
//! let user = Users::new(db.clone()).create("alice")?;
//! let tasks = Tasks::new(db).find_all_tasks(&TaskFilter::new(user.id))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection handle, opening and timestamp encoding.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

/// Task rows with soft deletion and predicate-driven listing.
pub mod tasks;

/// API principals and their tokens.
pub mod users;
