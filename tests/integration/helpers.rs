//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use sangrah_core::config::AppConfig;
use sangrah_core::types::id::UserId;
use sangrah_database::Stores;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores
    pub fn new() -> Self {
        let router = sangrah_api::build_app(AppConfig::in_memory(), Stores::memory());
        Self { router }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        actor: Option<UserId>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(actor) = actor {
            req = req.header("X-User-Id", actor.to_string());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a document and return its ID
    pub async fn create_document(&self, body: Value) -> String {
        let response = self.request("POST", "/api/documents", Some(body), None).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["document"]["id"]
            .as_str()
            .expect("document id")
            .to_string()
    }

    /// Patch a document and return the new version number
    pub async fn edit(&self, id: &str, body: Value) -> i64 {
        let response = self
            .request("PATCH", &format!("/api/documents/{id}"), Some(body), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.data()["version"]["versionNumber"]
            .as_i64()
            .expect("version number")
    }
}
