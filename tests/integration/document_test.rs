//! Integration tests for document create and edit.

use http::StatusCode;
use serde_json::json;

use sangrah_core::types::id::UserId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
}

#[tokio::test]
async fn test_create_document_records_version_one() {
    let app = TestApp::new();
    let actor = UserId::new();

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "MoU with district office", "tags": ["mou"] })),
            Some(actor),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["document"]["ownerId"], actor.to_string());
    assert_eq!(data["version"]["versionNumber"], 1);
    assert_eq!(data["version"]["versionLabel"], "1.0");
    assert_eq!(data["version"]["createdBy"], actor.to_string());
    assert_eq!(data["version"]["snapshot"]["tags"], json!(["mou"]));
}

#[tokio::test]
async fn test_create_document_validation() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/documents", Some(json!({ "title": "" })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "Memo" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_bad_actor_header_is_rejected() {
    let app = TestApp::new();
    let id = app.create_document(json!({ "title": "Memo" })).await;

    let req = http::Request::builder()
        .method("GET")
        .uri(format!("/api/documents/{id}"))
        .header("X-User-Id", "alice")
        .body(axum::body::Body::empty())
        .expect("request");
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");
    // Reads do not need an actor, so the header is not inspected.
    assert_eq!(response.status(), StatusCode::OK);

    let req = http::Request::builder()
        .method("PATCH")
        .uri(format!("/api/documents/{id}"))
        .header("Content-Type", "application/json")
        .header("X-User-Id", "alice")
        .body(axum::body::Body::from(r#"{"comment":"x"}"#))
        .expect("request");
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_document() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/documents/00000000-0000-0000-0000-999999999999",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/documents/nope", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_edit_summary() {
    let app = TestApp::new();
    let id = app
        .create_document(json!({ "title": "Vendor quote", "comment": "first" }))
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/documents/{id}"),
            Some(json!({ "comment": "second" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["document"]["comment"], "second");
    assert_eq!(response.data()["version"]["versionNumber"], 2);
    assert_eq!(response.data()["version"]["changeReason"], "comment updated");
}

#[tokio::test]
async fn test_edit_with_label_and_reason() {
    let app = TestApp::new();
    let id = app.create_document(json!({ "title": "Policy" })).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/documents/{id}"),
            Some(json!({
                "status": "Pending",
                "changeType": "minor",
                "changeReason": "Sent for review",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let version = &response.data()["version"];
    assert_eq!(version["versionLabel"], "1.1");
    assert_eq!(version["changeReason"], "Sent for review");
}

#[tokio::test]
async fn test_patch_is_validated_like_create() {
    let app = TestApp::new();
    let id = app.create_document(json!({ "title": "Policy" })).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/documents/{id}"),
            Some(json!({ "link": "not a url" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let latest = app
        .request("GET", &format!("/api/documents/{id}/versions/latest"), None, None)
        .await;
    assert_eq!(latest.data()["versionNumber"], 1);

    assert_eq!(
        app.edit(&id, json!({ "link": "https://example.org/policy" }))
            .await,
        2
    );
}
