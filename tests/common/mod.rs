//! Shared helpers for router integration tests.

#![allow(dead_code, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use tower::ServiceExt;

use toolchangelog::app_state::AppState;
use toolchangelog::config::ServiceConfig;
use toolchangelog::server::build_app;

/// Builds the full application (same middleware as the binary) over a
/// fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app(AppState::in_memory(), &ServiceConfig::in_memory())
}

/// Sends a request with an optional JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("invalid request for {uri}");
    };
    let Ok(response) = app.clone().oneshot(request).await;
    response
}

/// Sends a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

/// Reads the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), 1 << 20).await else {
        panic!("failed to read body");
    };
    let Ok(json) = serde_json::from_slice(&bytes) else {
        panic!("body is not json: {}", String::from_utf8_lossy(&bytes));
    };
    json
}

/// Creates a tool through the API and returns its JSON representation.
pub async fn create_tool(app: &Router, name_kurz: &str, name_lang: &str) -> serde_json::Value {
    let response = send(
        app,
        Method::POST,
        "/api/tools",
        Some(serde_json::json!({ "nameKurz": name_kurz, "nameLang": name_lang })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Creates an entry through the API and returns its JSON representation.
pub async fn create_entry(
    app: &Router,
    tool_id: &str,
    version: &str,
    datum: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "toolId": tool_id,
        "version": version,
        "beschreibung": format!("Changes in {version}"),
    });
    if let (Some(datum), Some(map)) = (datum, body.as_object_mut()) {
        map.insert("datum".to_string(), serde_json::Value::from(datum));
    }
    let response = send(app, Method::POST, "/api/changelogentries", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Extracts a string field, panicking with context if absent.
pub fn str_field<'a>(json: &'a serde_json::Value, field: &str) -> &'a str {
    let Some(value) = json.get(field).and_then(serde_json::Value::as_str) else {
        panic!("missing string field {field} in {json}");
    };
    value
}
