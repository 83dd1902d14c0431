//! Integration tests for version history and restore.

use http::StatusCode;
use serde_json::json;

use sangrah_core::types::id::UserId;

use crate::helpers::TestApp;

/// Versions 1 (Draft), 2 (Approved, [a]) and 3 (Rejected, [a, b]).
async fn three_versions(app: &TestApp) -> String {
    let id = app.create_document(json!({ "title": "Grant report" })).await;
    assert_eq!(
        app.edit(&id, json!({ "status": "Approved", "tags": ["a"] }))
            .await,
        2
    );
    assert_eq!(
        app.edit(&id, json!({ "status": "Rejected", "tags": ["a", "b"] }))
            .await,
        3
    );
    id
}

fn numbers(body: &serde_json::Value) -> Vec<i64> {
    body["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|v| v["versionNumber"].as_i64().expect("number"))
        .collect()
}

#[tokio::test]
async fn test_restore_first_version() {
    let app = TestApp::new();
    let id = three_versions(&app).await;
    let actor = UserId::new();

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/versions/1/restore"),
            Some(json!({})),
            Some(actor),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let data = response.data();
    assert_eq!(data["version"]["versionNumber"], 4);
    assert_eq!(data["version"]["changeReason"], "Restored to version 1");
    assert_eq!(data["version"]["createdBy"], actor.to_string());
    assert_eq!(data["version"]["snapshot"]["status"], "Draft");
    assert_eq!(data["version"]["snapshot"]["tags"], json!([]));
    assert_eq!(data["document"]["status"], "Draft");
    assert_eq!(data["document"]["tags"], json!([]));

    let listing = app
        .request("GET", &format!("/api/documents/{id}/versions"), None, None)
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(numbers(&listing.body), vec![4, 3, 2, 1]);
}

#[tokio::test]
async fn test_restore_with_notes_keeps_history() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let before = app
        .request("GET", &format!("/api/documents/{id}/versions/2"), None, None)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/versions/2/restore"),
            Some(json!({ "notes": "approved copy" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.data()["version"]["changeReason"],
        "Restored to version 2: approved copy"
    );
    assert_eq!(
        response.data()["summary"],
        "Tags updated, Status changed from Rejected to Approved"
    );

    let after = app
        .request("GET", &format!("/api/documents/{id}/versions/2"), None, None)
        .await;
    assert_eq!(before.body, after.body);

    let live = app
        .request("GET", &format!("/api/documents/{id}"), None, None)
        .await;
    assert_eq!(live.data()["status"], "Approved");
    assert_eq!(live.data()["tags"], json!(["a"]));
}

#[tokio::test]
async fn test_restore_unknown_version() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/versions/42/restore"),
            Some(json!({})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/versions/0/restore"),
            Some(json!({})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_latest_and_view() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let latest = app
        .request("GET", &format!("/api/documents/{id}/versions/latest"), None, None)
        .await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(latest.data()["versionNumber"], 3);

    let first = app
        .request("GET", &format!("/api/documents/{id}/versions/1"), None, None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["changeReason"], "Initial version");

    let missing = app
        .request("GET", &format!("/api/documents/{id}/versions/9"), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let page = app
        .request(
            "GET",
            &format!("/api/documents/{id}/versions?page=1&per_page=2"),
            None,
            None,
        )
        .await;
    assert_eq!(numbers(&page.body), vec![3, 2]);
    assert_eq!(page.data()["total"], 3);
    assert_eq!(page.data()["has_next"], true);

    let next = app
        .request(
            "GET",
            &format!("/api/documents/{id}/versions?page=2&per_page=2"),
            None,
            None,
        )
        .await;
    assert_eq!(numbers(&next.body), vec![1]);
    assert_eq!(next.data()["has_next"], false);
}

#[tokio::test]
async fn test_out_of_range_page_is_rejected() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{id}/versions?page={}&per_page=100", u64::MAX),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let far = app
        .request(
            "GET",
            &format!("/api/documents/{id}/versions?page=1000000"),
            None,
            None,
        )
        .await;
    assert_eq!(far.status, StatusCode::OK);
    assert!(numbers(&far.body).is_empty());
}

#[tokio::test]
async fn test_compare() {
    let app = TestApp::new();
    let id = three_versions(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{id}/versions/compare?from=1&to=3"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let changes = response.data()["changes"].as_array().expect("changes");
    let fields: Vec<&str> = changes
        .iter()
        .map(|c| c["field"].as_str().expect("field"))
        .collect();
    assert_eq!(fields, vec!["tags", "status"]);
    assert_eq!(changes[1]["oldValue"], "Draft");
    assert_eq!(changes[1]["newValue"], "Rejected");
}

#[tokio::test]
async fn test_history_of_unknown_document_is_empty() {
    let app = TestApp::new();
    let path = "/api/documents/00000000-0000-0000-0000-999999999999/versions";

    let listing = app.request("GET", path, None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data()["total"], 0);

    let latest = app
        .request("GET", &format!("{path}/latest"), None, None)
        .await;
    assert_eq!(latest.status, StatusCode::NOT_FOUND);
}
