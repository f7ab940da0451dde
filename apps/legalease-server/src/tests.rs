//! HTTP tests for the development host

use std::path::PathBuf;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::api::validate_sample_name;
use crate::{router, AppState};

fn www_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../legalease-web/www")
}

fn server() -> TestServer {
    let state = AppState {
        sample_docs_dir: www_dir().join("sample-docs"),
    };
    TestServer::new(router(state, www_dir())).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = server().get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "legalease-server");
}

#[tokio::test]
async fn test_sample_is_plain_text() {
    let response = server().get("/sample-docs/rental_agreement.txt").await;
    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert_eq!(content_type.to_str().unwrap(), "text/plain; charset=utf-8");
    assert!(response.text().contains("Tenant"));
}

#[tokio::test]
async fn test_missing_sample_is_json_404() {
    let response = server().get("/sample-docs/nope.txt").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "SAMPLE_NOT_FOUND");
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let response = server().get("/sample-docs/..%2Fsecret.txt").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_is_served() {
    let response = server().get("/index.html").await;
    response.assert_status_ok();
    assert!(response.text().contains("id=\"docPreview\""));
}

#[test]
fn test_sample_name_validation() {
    assert!(validate_sample_name("lease.txt").is_ok());
    assert!(validate_sample_name("").is_err());
    assert!(validate_sample_name("a/b.txt").is_err());
    assert!(validate_sample_name("a\\b.txt").is_err());
    assert!(validate_sample_name("..").is_err());
}
