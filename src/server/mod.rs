//! HTTP API.
//!
//! | method | path                      | result             |
//! |--------|---------------------------|--------------------|
//! | GET    | `/health`                 | 200                |
//! | POST   | `/tasks`                  | 201 created task   |
//! | GET    | `/tasks?status=&date=`    | 200 task list      |
//! | GET    | `/tasks/{taskId}`         | 200 task           |
//! | PUT    | `/tasks/{taskId}`         | 200 updated task   |
//! | DELETE | `/tasks/{taskId}`         | 204                |
//! | PUT    | `/tasks/{taskId}/status`  | 200 updated task   |
//!
//! Every `/tasks` route requires `Authorization: Bearer <token>`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod requests;
pub mod resources;

use crate::db::{db::Db, tasks::Tasks, users::Users};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::service::TaskService;
use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
    pub users: Arc<Users>,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        AppState {
            service: TaskService::new(Arc::new(Tasks::new(db.clone()))),
            users: Arc::new(Users::new(db)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tasks", post(handlers::save).get(handlers::find_all))
        .route(
            "/tasks/{taskId}",
            get(handlers::find).put(handlers::update).delete(handlers::delete),
        )
        .route("/tasks/{taskId}/status", put(handlers::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the database and serves the API until Ctrl+C.
pub async fn serve(config: &Config) -> Result<()> {
    let db = Db::open(config.database().path)?;
    let listener = TcpListener::bind(config.server().bind_address()).await?;
    tracing::info!("{}", Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("{}", Message::ServerShuttingDown),
        Err(e) => {
            tracing::error!("{}", Message::ShutdownSignalFailed(e.to_string()));
            std::future::pending::<()>().await;
        }
    }
}
