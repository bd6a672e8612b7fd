use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, User>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/test", get(hello_text))
        .route("/test-json", get(hello_json))
        .route("/test-500", get(fail_text))
        .route("/test-500-json", get(fail_json))
        .route("/echo", any(echo))
        .route("/api/v1/users", get(list_users).post(create_user))
        .route(
            "/api/v1/users/{id}",
            get(get_user).put(replace_user).patch(update_user).delete(delete_user),
        )
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

async fn hello_text() -> &'static str {
    "Hello World"
}

async fn hello_json() -> Json<Value> {
    Json(json!({ "data": "Hello World" }))
}

async fn fail_text() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

async fn fail_json() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal Server Error" })),
    )
}

/// Describe the request back to the caller.
async fn echo(
    method: Method,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let query: serde_json::Map<String, Value> = query
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "method": method.as_str(),
        "query": query,
        "contentType": content_type,
        "body": body,
    }))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    Json(users.values().cloned().collect())
}

async fn create_user(State(db): State<Db>, Json(input): Json<CreateUser>) -> (StatusCode, Json<User>) {
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
    };
    db.write().await.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let users = db.read().await;
    match users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found(),
    }
}

async fn replace_user(State(db): State<Db>, Path(id): Path<Uuid>, Json(input): Json<CreateUser>) -> Response {
    let mut users = db.write().await;
    let Some(user) = users.get_mut(&id) else {
        return not_found();
    };
    user.name = input.name;
    user.email = input.email;
    Json(user.clone()).into_response()
}

async fn update_user(State(db): State<Db>, Path(id): Path<Uuid>, Json(input): Json<UpdateUser>) -> Response {
    let mut users = db.write().await;
    let Some(user) = users.get_mut(&id) else {
        return not_found();
    };
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = Some(email);
    }
    Json(user.clone()).into_response()
}

async fn delete_user(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let mut users = db.write().await;
    match users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
