//! Task endpoints.
//!
//! Handlers translate between the wire and the service. Ownership of a
//! `{taskId}` is settled by the [`OwnedTask`] extractor before a handler
//! body runs.

use super::error::ApiErrorResponse;
use super::extract::{blocking, CurrentUser, OwnedTask};
use super::requests::{ListQuery, TaskRequest, UpdateTaskStatusRequest};
use super::resources::{HealthResponse, TaskDto};
use super::AppState;
use crate::libs::data_storage::APP_VERSION;
use crate::libs::error::TaskError;
use crate::libs::filter::TaskFilter;
use crate::libs::messages::Message;
use crate::libs::task::NewTask;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

type ApiResult<T> = Result<T, ApiErrorResponse>;

fn controller_failure(operation: &'static str, error: TaskError) -> ApiErrorResponse {
    if error.is_not_found() {
        tracing::debug!("{}", Message::ControllerFailed(operation, error.to_string()));
    } else {
        tracing::error!("{}", Message::ControllerFailed(operation, error.to_string()));
    }
    error.into()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>, message: Message) -> ApiResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("{}: {}", message, rejection.body_text());
        ApiErrorResponse::bad_request(message.to_string())
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: APP_VERSION.to_string(),
    })
}

pub async fn save(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskDto>)> {
    let changes = body(payload, Message::InvalidRequestBody)?.into_changes()?;
    let service = state.service.clone();

    let task = blocking(move || {
        service
            .save(NewTask::new(user.id, changes))
            .map_err(|e| controller_failure("save", e))
    })
    .await?;

    tracing::info!("{}", Message::TaskCreated(task.id));
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn find(OwnedTask(task): OwnedTask) -> Json<TaskDto> {
    Json(task.into_inner().into())
}

pub async fn find_all(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskDto>>> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("{}", rejection.body_text());
        ApiErrorResponse::bad_request(Message::InvalidRequestBody.to_string())
    })?;
    let filter = TaskFilter::parse(user.id, query.status.as_deref(), query.date.as_deref())?;
    let service = state.service.clone();

    let tasks = blocking(move || service.find_all(&filter).map_err(|e| controller_failure("find_all", e))).await?;

    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

pub async fn update(
    State(state): State<AppState>,
    OwnedTask(task): OwnedTask,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskDto>> {
    let changes = body(payload, Message::InvalidRequestBody)?.into_changes()?;
    let mut task = task.into_inner();
    task.merge(changes);
    let service = state.service.clone();

    let task = blocking(move || service.update(task).map_err(|e| controller_failure("update", e))).await?;

    tracing::info!("{}", Message::TaskUpdated(task.id));
    Ok(Json(task.into()))
}

pub async fn delete(State(state): State<AppState>, OwnedTask(task): OwnedTask) -> ApiResult<StatusCode> {
    let id = task.id;
    let service = state.service.clone();

    blocking(move || service.delete(id).map_err(|e| controller_failure("delete", e))).await?;

    tracing::info!("{}", Message::TaskDeleted(id));
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    State(state): State<AppState>,
    OwnedTask(task): OwnedTask,
    payload: Result<Json<UpdateTaskStatusRequest>, JsonRejection>,
) -> ApiResult<Json<TaskDto>> {
    let status = body(payload, Message::InvalidStatusRequestBody)?.status()?;
    let id = task.id;
    let service = state.service.clone();

    let task = blocking(move || {
        service
            .update_status(id, status)
            .map_err(|e| controller_failure("update_status", e))
    })
    .await?;

    tracing::info!("{}", Message::TaskStatusChanged(task.id, task.status.to_string()));
    Ok(Json(task.into()))
}
