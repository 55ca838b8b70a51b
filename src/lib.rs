//! # taskd - a small task tracking service
//!
//! A REST API for personal tasks backed by SQLite. Every task belongs to one
//! user, who alone may read or change it.
//!
//! ## Features
//!
//! - **Task CRUD** over HTTP with bearer-token authentication
//! - **Filtered listing** by status and by scheduled day
//! - **Soft deletion**: deleted tasks disappear from every query
//! - **Administration CLI** for users, configuration and migrations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskd::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
