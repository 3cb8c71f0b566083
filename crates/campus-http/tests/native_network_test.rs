//! Transport tests against a local axum server.

use axum::extract::{Multipart, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use campus_http::{ApiError, ApiRequest, FormField, HttpClient, HttpConfig, Normalized};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;

async fn echo(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "code": 200,
        "msg": "ok",
        "data": {"authorization": auth, "query": query}
    }))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "user_id": 6,
        "identity": body["identity"],
        "name": "Zhang San",
        "token": "tok-123"
    }))
}

async fn upload(mut multipart: Multipart) -> Json<Value> {
    let mut fields = serde_json::Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let text = field.text().await.unwrap_or_default();
        fields.insert(name, json!({"file_name": file_name, "text": text}));
    }
    Json(json!({"code": 200, "data": fields}))
}

async fn unauthorized() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "token expired"})))
}

async fn business_error() -> Json<Value> {
    Json(json!({"code": 403, "msg": "teachers only"}))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/echo", get(echo))
        .route("/api/auth/login", post(login))
        .route("/api/attachments/upload", post(upload))
        .route("/api/private", get(unauthorized))
        .route("/api/publish/research", post(business_error));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> HttpClient {
    HttpClient::with_config(HttpConfig::with_base_url(format!("http://{}/api", addr))).unwrap()
}

#[tokio::test]
async fn test_bearer_and_query_reach_server() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let data = client
        .request(
            ApiRequest::get("/echo")
                .with_query("page", "2")
                .with_query("search", "robot arm")
                .with_bearer("tok-123"),
        )
        .await
        .unwrap()
        .into_data();

    assert_eq!(data["authorization"], "Bearer tok-123");
    assert_eq!(data["query"]["page"], "2");
    assert_eq!(data["query"]["search"], "robot arm");
}

#[tokio::test]
async fn test_no_bearer_without_token() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let data = client.request(ApiRequest::get("/echo")).await.unwrap().into_data();
    assert!(data["authorization"].is_null());
}

#[tokio::test]
async fn test_json_body_and_bare_response() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let normalized = client
        .request(ApiRequest::post("/auth/login").with_json(json!({
            "identity": 1,
            "account": "T1001",
            "password": "secret"
        })))
        .await
        .unwrap();

    match normalized {
        Normalized::Bare(body) => {
            assert_eq!(body["token"], "tok-123");
            assert_eq!(body["identity"], 1);
        }
        other => panic!("expected bare body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_multipart_upload_fields() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let fields = vec![
        FormField::File {
            name: "file".to_string(),
            file_name: "plan.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            data: bytes::Bytes::from_static(b"milestones"),
        },
        FormField::text("post_id", "-1"),
    ];

    let data = client
        .request(ApiRequest::post("/attachments/upload").with_multipart(fields))
        .await
        .unwrap()
        .into_data();

    assert_eq!(data["file"]["file_name"], "plan.txt");
    assert_eq!(data["file"]["text"], "milestones");
    assert_eq!(data["post_id"]["text"], "-1");
}

#[tokio::test]
async fn test_error_statuses() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let err = client.request(ApiRequest::get("/private")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "token expired");

    let err = client
        .request(ApiRequest::post("/publish/research").with_json(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Business {
            code: 403,
            msg: "teachers only".to_string()
        }
    );

    let err = client.request(ApiRequest::get("/missing")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.request(ApiRequest::get("/echo")).await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}
