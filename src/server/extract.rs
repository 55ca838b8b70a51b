//! Request extractors: the authenticated user and the task a route addresses.

use super::error::ApiErrorResponse;
use super::AppState;
use crate::libs::access::{self, Authorized};
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::libs::user::User;
use axum::extract::{FromRequestParts, Path};
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

/// Name of the route parameter that carries a task id.
pub const TASK_PATH_KEY: &str = "taskId";

/// Runs store work off the async runtime.
pub async fn blocking<T, F>(work: F) -> Result<T, ApiErrorResponse>
where
    F: FnOnce() -> Result<T, ApiErrorResponse> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("{}", Message::BlockingTaskFailed(e.to_string()));
            Err(ApiErrorResponse::internal_error())
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// The user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiErrorResponse::unauthorized(Message::MissingCredentials.to_string()))?;

        let users = state.users.clone();
        let user = blocking(move || {
            users.find_by_token(&token).map_err(|e| {
                tracing::error!("{}", Message::GateFailed(e.to_string()));
                ApiErrorResponse::internal_error()
            })
        })
        .await?;

        user.map(CurrentUser)
            .ok_or_else(|| ApiErrorResponse::unauthorized(Message::InvalidCredentials.to_string()))
    }
}

/// A task addressed by `{taskId}` and owned by the current user.
///
/// Authentication runs first, so an anonymous request is a 401 even for a
/// task that does not exist.
#[derive(Debug, Clone)]
pub struct OwnedTask(pub Authorized<Task>);

impl FromRequestParts<AppState> for OwnedTask {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiErrorResponse::bad_request(Message::InvalidPathId(TASK_PATH_KEY.to_string()).to_string()))?;

        let service = state.service.clone();
        blocking(move || {
            access::authorize(&service, TASK_PATH_KEY, &raw, &user)
                .map(OwnedTask)
                .map_err(ApiErrorResponse::from)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc123")).as_deref(), Some("abc123"));
    }

    #[test]
    fn other_schemes_and_blank_tokens_are_ignored() {
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
