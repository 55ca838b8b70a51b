//! Core library modules: the task domain, its rules and the ambient
//! plumbing (configuration, storage paths, messages).
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskd::db::{db::Db, tasks::Tasks};
//! use taskd::libs::service::TaskService;
//! use taskd::libs::task::{NewTask, TaskChanges};
//!
//! let service = TaskService::new(Arc::new(Tasks::new(Db::new()?)));
//! let task = service.save(NewTask::new(1, TaskChanges {
//!     title: "Buy milk".to_string(),
//!     description: None,
//!     date: None,
//! }))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod access;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod filter;
pub mod messages;
pub mod service;
pub mod task;
pub mod user;
pub mod view;
