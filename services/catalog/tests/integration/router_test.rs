//! Router-level checks that stop before any storage access.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use toolhub_catalog::infra::mail::SmtpCodeNotifier;
use toolhub_catalog::router::build_router;
use toolhub_catalog::state::AppState;
use toolhub_domain::role::Role;
use toolhub_testing::auth::{MockSession, TEST_SESSION_SECRET};

use crate::helpers::cheap_hasher;

fn test_server() -> TestServer {
    let redis = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let notifier = SmtpCodeNotifier {
        transport: AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("localhost").build(),
        from: "ToolHub <no-reply@toolhub.test>".parse().unwrap(),
    };
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        redis,
        notifier,
        hasher: cheap_hasher(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
        cookie_domain: "localhost".to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn session_cookie(role: Role) -> (HeaderName, HeaderValue) {
    MockSession::new(Uuid::new_v4(), role).cookie_header()
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();

    let status: Value = server.get("/status").await.json();
    assert_eq!(status["status"], "ok");
}

#[tokio::test]
async fn should_echo_generated_request_id() {
    let server = test_server();

    let response = server.get("/healthz").await;

    let id = response.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_list_roles_without_session() {
    let server = test_server();

    let roles: Value = server.get("/roles").await.json();

    assert_eq!(
        roles,
        json!(["owner", "backend", "frontend", "pm", "qa", "designer"])
    );
}

#[tokio::test]
async fn should_require_session_for_catalog_routes() {
    let server = test_server();
    let tool_id = Uuid::new_v4();

    server
        .get("/tools")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/user")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post(&format!("/tools/{tool_id}/delete-request"))
        .json(&json!({}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post(&format!("/tools/{tool_id}/delete-confirm"))
        .json(&json!({ "code": "123456" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_accept_delete_request_without_body() {
    let server = test_server();
    let (name, value) = session_cookie(Role::Backend);
    let tool_id = Uuid::new_v4();

    let response = server
        .post(&format!("/tools/{tool_id}/delete-request"))
        .add_header(name, value)
        .await;

    // Extraction succeeds and the use case runs; storage is unreachable in this harness.
    let status = response.status_code();
    assert_ne!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_ne!(status, StatusCode::BAD_REQUEST);
    assert_ne!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_forged_session_cookie() {
    let server = test_server();

    server
        .get("/tools")
        .add_header(header::COOKIE, HeaderValue::from_static("toolhub_session=not-a-jwt"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_admin_listing_for_non_owner() {
    let server = test_server();
    let (name, value) = session_cookie(Role::Backend);

    let response = server.get("/admin/tools").add_header(name, value).await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_reject_unknown_role_filter() {
    let server = test_server();
    let (name, value) = session_cookie(Role::Qa);

    let response = server
        .get("/tools")
        .add_query_param("role", "wizard")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_reject_login_with_missing_fields() {
    let server = test_server();

    let response = server
        .post("/login")
        .json(&json!({ "email": "", "password": "" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_clear_session_cookie_on_logout() {
    let server = test_server();

    let response = server.post("/logout").await;

    response.assert_status(StatusCode::NO_CONTENT);
    let cookie = response.cookie("toolhub_session");
    assert_eq!(cookie.value(), "");
}
