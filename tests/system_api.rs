//! Health and OpenAPI document endpoints, plus a run against a real
//! listener.

#![allow(clippy::panic)]

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use serde_json::json;

#[tokio::test]
async fn health_reports_memory_storage() {
    let app = build_test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = build_test_app();
    let response = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/api/tools/{id}").is_some());
    assert!(doc["paths"].get("/api/changelogentries/tool/{toolId}").is_some());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app();
    let response = get(&app, "/api/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_over_tcp() {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    let app = build_test_app();
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let Ok(created) = client
        .post(format!("{base}/api/tools"))
        .json(&json!({ "nameKurz": "git", "nameLang": "Git" }))
        .send()
        .await
    else {
        panic!("create request failed");
    };
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let Ok(tool) = created.json::<serde_json::Value>().await else {
        panic!("create body is not json");
    };
    let Some(id) = tool["id"].as_str() else {
        panic!("missing id");
    };

    let Ok(entry) = client
        .post(format!("{base}/api/changelogentries"))
        .json(&json!({ "toolId": id, "version": "1.0", "beschreibung": "Initial" }))
        .send()
        .await
    else {
        panic!("entry request failed");
    };
    assert_eq!(entry.status(), reqwest::StatusCode::CREATED);

    let Ok(detail) = client.get(format!("{base}/api/tools/{id}")).send().await else {
        panic!("get request failed");
    };
    assert_eq!(detail.status(), reqwest::StatusCode::OK);
    let Ok(detail) = detail.json::<serde_json::Value>().await else {
        panic!("detail body is not json");
    };
    assert_eq!(detail["changelogEntries"][0]["version"], "1.0");

    server.abort();
}
