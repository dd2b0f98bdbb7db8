use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use reelrate_server::{api::app_router, build_state, config::Config};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router(auth_token: Option<&str>) -> (axum::Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        auth_token: auth_token.map(str::to_string),
        box_office: None,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn list_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri("/movies");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn protected_routes_require_bearer_token() {
    let (app, _tmp) = build_test_router(Some("s3cret")).await;

    let response = app.clone().oneshot(list_request(None)).await.unwrap();
    assert_eq!(response.status(), 401);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 401);

    for bad in ["Bearer wrong", "Basic s3cret", "s3cret"] {
        let response = app.clone().oneshot(list_request(Some(bad))).await.unwrap();
        assert_eq!(response.status(), 401, "{} should be rejected", bad);
    }

    let response = app
        .clone()
        .oneshot(list_request(Some("Bearer s3cret")))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn missing_token_config_leaves_api_open() {
    let (app, _tmp) = build_test_router(None).await;
    let response = app.oneshot(list_request(None)).await.unwrap();
    assert_eq!(response.status(), 200);
}
