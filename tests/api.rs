#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use taskd::db::db::Db;
    use taskd::db::users::Users;
    use taskd::server::{router, AppState};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tower::ServiceExt;

    struct ApiTestContext {
        _temp_dir: TempDir,
        app: Router,
        alice: String,
        bob: String,
    }

    impl AsyncTestContext for ApiTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("taskd.db")).unwrap();
            let users = Users::new(db.clone());
            let alice = users.create("alice").unwrap().token;
            let bob = users.create("bob").unwrap().token;

            ApiTestContext {
                _temp_dir: temp_dir,
                app: router(AppState::new(db)),
                alice,
                bob,
            }
        }
    }

    impl ApiTestContext {
        async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => request.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn create(&self, token: &str, body: Value) -> Value {
            let (status, task) = self.send(Method::POST, "/tasks", Some(token), Some(body)).await;
            assert_eq!(status, StatusCode::CREATED, "{task}");
            task
        }
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_health_needs_no_token(ctx: &mut ApiTestContext) {
        let (status, body) = ctx.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_requests_without_valid_token_are_unauthorized(ctx: &mut ApiTestContext) {
        let (status, body) = ctx.send(Method::GET, "/tasks", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = ctx.send(Method::GET, "/tasks", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Authentication is checked before the task is looked up.
        let (status, _) = ctx.send(Method::GET, "/tasks/999", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_create_returns_new_task(ctx: &mut ApiTestContext) {
        let task = ctx
            .create(&ctx.alice, json!({"title": "Buy milk", "description": "2 litres", "date": 1710460800, "status": "COMPLETE"}))
            .await;

        assert!(task["id"].as_i64().unwrap() > 0);
        assert_eq!(task["title"], "Buy milk");
        assert_eq!(task["description"], "2 litres");
        assert_eq!(task["date"], 1710460800);
        assert_eq!(task["status"], "NEW");
        assert_eq!(task["created_date"], task["updated_date"]);
        assert!(task.get("deleted_date").is_none());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_create_rejects_bad_bodies(ctx: &mut ApiTestContext) {
        let (status, body) = ctx.send(Method::POST, "/tasks", Some(&ctx.alice), Some(json!({"title": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "title");

        let (status, body) = ctx
            .send(Method::POST, "/tasks", Some(&ctx.alice), Some(json!({"title": 42})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid request body");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_date_past_year_9999_is_rejected(ctx: &mut ApiTestContext) {
        ctx.create(&ctx.alice, json!({"title": "near"})).await;

        let (status, body) = ctx
            .send(Method::POST, "/tasks", Some(&ctx.alice), Some(json!({"title": "far", "date": 253402300800_i64})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "date");

        let task = ctx
            .create(&ctx.alice, json!({"title": "last day", "date": 253402300799_i64}))
            .await;
        assert_eq!(task["date"], 253402300799_i64);

        let (status, all) = ctx.send(Method::GET, "/tasks", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_foreign_task_is_forbidden(ctx: &mut ApiTestContext) {
        let task = ctx.create(&ctx.alice, json!({"title": "Private"})).await;
        let uri = format!("/tasks/{}", task["id"]);

        let (status, body) = ctx.send(Method::GET, &uri, Some(&ctx.bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "access denied");

        let (status, _) = ctx.send(Method::DELETE, &uri, Some(&ctx.bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, fetched) = ctx.send(Method::GET, &uri, Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, task);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_path_ids_are_validated(ctx: &mut ApiTestContext) {
        let (status, body) = ctx.send(Method::GET, "/tasks/abc", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid taskId parameter(only non-negative integers)");

        let (status, _) = ctx.send(Method::GET, "/tasks/-1", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let task = ctx.create(&ctx.alice, json!({"title": "First"})).await;
        let (status, body) = ctx
            .send(Method::GET, &format!("/tasks/+{}", task["id"]), Some(&ctx.alice), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid taskId parameter(only non-negative integers)");

        let (status, body) = ctx.send(Method::GET, "/tasks/999", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "record not found");

        let (status, _) = ctx
            .send(Method::GET, "/tasks/9223372036854775808", Some(&ctx.alice), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_list_filters(ctx: &mut ApiTestContext) {
        ctx.create(&ctx.alice, json!({"title": "today", "date": 1710493200})).await;
        ctx.create(&ctx.alice, json!({"title": "tomorrow", "date": 1710547200})).await;
        ctx.create(&ctx.bob, json!({"title": "bob today", "date": 1710493200})).await;

        let (status, all) = ctx.send(Method::GET, "/tasks", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (status, day) = ctx.send(Method::GET, "/tasks?date=2024-03-15", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day.as_array().unwrap().len(), 1);
        assert_eq!(day[0]["title"], "today");

        let (status, open) = ctx.send(Method::GET, "/tasks?status=NEW&date=", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(open.as_array().unwrap().len(), 2);

        let (status, body) = ctx.send(Method::GET, "/tasks?status=DONE", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid status filter value");

        let (status, body) = ctx.send(Method::GET, "/tasks?date=15-03-2024", Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid date format");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_update_keeps_status(ctx: &mut ApiTestContext) {
        let task = ctx.create(&ctx.alice, json!({"title": "Draft"})).await;
        let uri = format!("/tasks/{}", task["id"]);
        ctx.send(
            Method::PUT,
            &format!("{uri}/status"),
            Some(&ctx.alice),
            Some(json!({"status": "IN_PROGRESS"})),
        )
        .await;

        let (status, updated) = ctx
            .send(Method::PUT, &uri, Some(&ctx.alice), Some(json!({"title": "Final", "date": 1710460800})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Final");
        assert_eq!(updated["date"], 1710460800);
        assert_eq!(updated["status"], "IN_PROGRESS");
        assert_eq!(updated["created_date"], task["created_date"]);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_status_update(ctx: &mut ApiTestContext) {
        let task = ctx.create(&ctx.alice, json!({"title": "Ship it"})).await;
        let uri = format!("/tasks/{}/status", task["id"]);

        let (status, updated) = ctx
            .send(Method::PUT, &uri, Some(&ctx.alice), Some(json!({"status": "COMPLETE"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "COMPLETE");

        let (status, body) = ctx
            .send(Method::PUT, &uri, Some(&ctx.alice), Some(json!({"status": "complete"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid task status value");

        let (status, body) = ctx.send(Method::PUT, &uri, Some(&ctx.alice), Some(json!({"status": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid request body for status update");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_delete_is_soft_and_final(ctx: &mut ApiTestContext) {
        let task = ctx.create(&ctx.alice, json!({"title": "Temporary"})).await;
        let uri = format!("/tasks/{}", task["id"]);

        let (status, body) = ctx.send(Method::DELETE, &uri, Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = ctx.send(Method::GET, &uri, Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = ctx.send(Method::DELETE, &uri, Some(&ctx.alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, all) = ctx.send(Method::GET, "/tasks", Some(&ctx.alice), None).await;
        assert!(all.as_array().unwrap().is_empty());
    }
}
