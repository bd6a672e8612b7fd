use axum::http::{self, Request, StatusCode};
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::{app, User};
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn call(app: &mut RouterIntoService<String>, request: Request<String>) -> axum::response::Response {
    ServiceExt::ready(app).await.unwrap().call(request).await.unwrap()
}

// --- fixtures ---

#[tokio::test]
async fn text_fixture() {
    let resp = app().oneshot(empty_request("GET", "/test")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"Hello World");
}

#[tokio::test]
async fn json_fixture() {
    let resp = app().oneshot(empty_request("GET", "/test-json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"data": "Hello World"}));
}

#[tokio::test]
async fn failing_fixtures() {
    let resp = app().oneshot(empty_request("GET", "/test-500")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(&body_bytes(resp).await[..], b"Internal Server Error");

    let resp = app().oneshot(empty_request("GET", "/test-500-json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"message": "Internal Server Error"}));
}

// --- echo ---

#[tokio::test]
async fn echo_describes_the_request() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo?a=1&b=x+y", r#"{"k":"v"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["query"], json!({"a": "1", "b": "x y"}));
    assert_eq!(body["contentType"], "application/json");
    assert_eq!(body["body"], r#"{"k":"v"}"#);
}

// --- users ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(empty_request("GET", "/api/v1/users")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/users", r#"{"name":"Ada"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.name, "Ada");
    assert!(user.email.is_none());
}

#[tokio::test]
async fn create_user_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/users", r#"{"not_name":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_user_is_a_json_404() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/users/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn bad_uuid_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/users/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_user_returns_404() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/v1/users/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = call(&mut app, json_request("POST", "/api/v1/users", r#"{"name":"Ada"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    let id = created.id;

    // patch: only email
    let resp = call(
        &mut app,
        json_request("PATCH", &format!("/api/v1/users/{id}"), r#"{"email":"ada@example.com"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: User = body_json(resp).await;
    assert_eq!(patched.name, "Ada");
    assert_eq!(patched.email.as_deref(), Some("ada@example.com"));

    // put: replaces, so the omitted email is cleared
    let resp = call(
        &mut app,
        json_request("PUT", &format!("/api/v1/users/{id}"), r#"{"name":"Grace"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: User = body_json(resp).await;
    assert_eq!(replaced.name, "Grace");
    assert!(replaced.email.is_none());

    // get
    let resp = call(&mut app, empty_request("GET", &format!("/api/v1/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched.name, "Grace");

    // delete
    let resp = call(&mut app, empty_request("DELETE", &format!("/api/v1/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete
    let resp = call(&mut app, empty_request("GET", "/api/v1/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}
