mod common;

use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

use common::{build_state, spawn_app, spawn_router, CLIENT_ID, TENANT_ID};
use eden_teams_config::{
    runtime::{BuildEnv, CONFIG_STORAGE_KEY},
    service::store::{ConfigStore, MemoryConfigStore},
};

async fn store_with_api_base(api_base: &str) -> Arc<MemoryConfigStore> {
    let store = Arc::new(MemoryConfigStore::new());
    store
        .set(
            CONFIG_STORAGE_KEY,
            &json!({
                "tenantId": TENANT_ID,
                "clientId": CLIENT_ID,
                "redirectUri": "http://localhost:5173",
                "apiBase": api_base,
            })
            .to_string(),
        )
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn forwards_question_to_backend_and_returns_answer() {
    let backend = spawn_router(Router::new().route(
        "/api/query",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "answer": format!("echo: {}", body["question"].as_str().unwrap_or_default()),
                "stats": {"calls": 12, "user": body["user"].clone()},
            }))
        }),
    ))
    .await;

    let base_url = spawn_app(store_with_api_base(&backend).await, BuildEnv::default()).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base_url}/api/v1/query"))
        .json(&json!({"question": "dropped calls last week", "user": "ana@example.com"}))
        .send()
        .await
        .expect("query request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("query json");
    assert_eq!(body["answer"], "echo: dropped calls last week");
    assert_eq!(body["stats"]["calls"], 12);
    assert_eq!(body["stats"]["user"], "ana@example.com");
}

#[tokio::test]
async fn ids_only_record_takes_redirect_and_api_base_from_environment() {
    let backend = spawn_router(Router::new().route(
        "/api/query",
        post(|| async { Json(json!({"answer": "from env backend"})) }),
    ))
    .await;

    let store = Arc::new(MemoryConfigStore::new());
    store
        .set(
            CONFIG_STORAGE_KEY,
            &json!({"tenantId": TENANT_ID, "clientId": CLIENT_ID}).to_string(),
        )
        .await
        .unwrap();
    let env = BuildEnv::from_pairs([
        ("VITE_AAD_REDIRECT_URI", "http://localhost:5173"),
        ("VITE_API_BASE", backend.as_str()),
    ]);

    let state = build_state(store.clone(), &env).await;
    assert_eq!(state.query().base_url(), backend);
    let identity = state.bootstrap().identity.as_ref().expect("identity settings");
    assert_eq!(identity.redirect_uri, "http://localhost:5173");

    let base_url = spawn_app(store, env).await;
    let client = reqwest::Client::new();
    let boot: Value = client
        .get(format!("{base_url}/api/v1/runtime-config"))
        .send()
        .await
        .expect("runtime config request failed")
        .json()
        .await
        .expect("bootstrap json");
    assert_eq!(boot["source"], "persisted");
    assert_eq!(boot["config"]["redirectUri"], "");
    assert_eq!(boot["identity"]["redirectUri"], "http://localhost:5173");
    assert_eq!(boot["apiBase"], backend);

    let resp = client
        .post(format!("{base_url}/api/v1/query"))
        .json(&json!({"question": "calls today"}))
        .send()
        .await
        .expect("query request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("query json");
    assert_eq!(body["answer"], "from env backend");
}

#[tokio::test]
async fn backend_error_detail_is_passed_through() {
    let backend = spawn_router(Router::new().route(
        "/api/query",
        post(|| async {
            (
                AxumStatus::SERVICE_UNAVAILABLE,
                Json(json!({"detail": "Graph API credentials are not configured"})),
            )
        }),
    ))
    .await;

    let base_url = spawn_app(store_with_api_base(&backend).await, BuildEnv::default()).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base_url}/api/v1/query"))
        .json(&json!({"question": "how many calls?"}))
        .send()
        .await
        .expect("query request failed");

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.expect("error json");
    assert_eq!(body["message"], "Graph API credentials are not configured");
}

#[tokio::test]
async fn backend_error_without_detail_uses_generic_message() {
    let backend = spawn_router(Router::new().route(
        "/api/query",
        post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;

    let base_url = spawn_app(store_with_api_base(&backend).await, BuildEnv::default()).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base_url}/api/v1/query"))
        .json(&json!({"question": "how many calls?"}))
        .send()
        .await
        .expect("query request failed");

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.expect("error json");
    assert_eq!(
        body["message"],
        "Failed to query call records. Check API base and auth."
    );
}

#[tokio::test]
async fn empty_question_is_a_bad_request() {
    let base_url = spawn_app(
        store_with_api_base("http://127.0.0.1:9").await,
        BuildEnv::default(),
    )
    .await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base_url}/api/v1/query"))
        .json(&json!({"question": "  "}))
        .send()
        .await
        .expect("query request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error json");
    assert_eq!(body["message"], "Please enter a question.");
}

#[tokio::test]
async fn probes_endpoint_returns_empty_list_without_targets() {
    let base_url = spawn_app(Arc::new(MemoryConfigStore::new()), BuildEnv::default()).await;
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{base_url}/api/v1/probes"))
        .send()
        .await
        .expect("probes request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("probes json");
    assert_eq!(body, json!([]));
}
