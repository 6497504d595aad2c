//! End-to-end tests against the real router served on an ephemeral port.
//! The background generator is disabled so no test touches the network.

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use summaryd::api::{self, AppState};
use summaryd::db::Repository;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    // Held so the database file outlives the server
    _db_dir: TempDir,
}

impl TestApp {
    async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().unwrap();
        let db_path = db_dir.path().join("test.db");
        let repository = Repository::new(db_path.to_str().unwrap()).await.unwrap();

        let state = AppState {
            repository: Arc::new(repository),
            generator: None,
        };
        let app = api::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            _db_dir: db_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, url: &str) -> i64 {
        let response = self
            .client
            .post(self.url("/summaries/"))
            .json(&json!({ "url": url }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn create_summary_returns_201_with_id_and_url() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/summaries/"))
        .json(&json!({ "url": "https://example.com/" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "url": "https://example.com/" }));
}

#[tokio::test]
async fn create_summary_empty_body_is_422_missing_url() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/summaries/"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "detail": [
                {
                    "type": "missing",
                    "loc": ["body", "url"],
                    "msg": "Field required",
                    "input": {},
                }
            ]
        })
    );
}

#[tokio::test]
async fn create_summary_rejects_bad_scheme_without_creating() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/summaries/"))
        .json(&json!({ "url": "invalid://url" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["detail"][0]["msg"],
        "URL scheme should be 'http' or 'https'"
    );

    // Nothing was persisted
    let all: Value = app
        .client
        .get(app.url("/summaries/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn read_summary_returns_full_record() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let response = app
        .client
        .get(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["url"], "https://example.com/");
    assert_eq!(body["summary"], "");
    // created_at is serialized as UTC with a Z suffix
    let created_at = body["created_at"].as_str().unwrap();
    assert!(created_at.ends_with('Z'), "created_at: {}", created_at);
}

#[tokio::test]
async fn read_summary_missing_id_is_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/summaries/999/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Summary not found");
}

#[tokio::test]
async fn read_summary_id_zero_is_422_greater_than() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/summaries/0/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "detail": [
                {
                    "type": "greater_than",
                    "loc": ["path", "id"],
                    "msg": "Input should be greater than 0",
                    "input": "0",
                    "ctx": { "gt": 0 },
                }
            ]
        })
    );
}

#[tokio::test]
async fn read_summary_non_integer_id_is_422() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/summaries/abc/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"][0]["type"], "int_parsing");
}

#[tokio::test]
async fn read_all_summaries_lists_records_in_insertion_order() {
    let app = TestApp::spawn().await;
    let first = app.create("https://example.com/a").await;
    let second = app.create("https://example.com/b").await;

    let response = app
        .client
        .get(app.url("/summaries/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], first);
    assert_eq!(list[1]["id"], second);
}

#[tokio::test]
async fn update_summary_replaces_url_and_summary_only() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let before: Value = app
        .client
        .get(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = app
        .client
        .put(app.url(&format!("/summaries/{}/", id)))
        .json(&json!({ "url": "https://example.org/", "summary": "updated!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["url"], "https://example.org/");
    assert_eq!(body["summary"], "updated!");
    assert_eq!(body["created_at"], before["created_at"]);
}

#[tokio::test]
async fn update_summary_missing_id_is_404_and_store_unchanged() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let response = app
        .client
        .put(app.url("/summaries/999/"))
        .json(&json!({ "url": "https://example.org/", "summary": "updated!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Summary not found");

    let record: Value = app
        .client
        .get(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["url"], "https://example.com/");
}

#[tokio::test]
async fn update_summary_empty_body_reports_both_fields() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let response = app
        .client
        .put(app.url(&format!("/summaries/{}/", id)))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "detail": [
                {
                    "type": "missing",
                    "loc": ["body", "url"],
                    "msg": "Field required",
                    "input": {},
                },
                {
                    "type": "missing",
                    "loc": ["body", "summary"],
                    "msg": "Field required",
                    "input": {},
                }
            ]
        })
    );
}

#[tokio::test]
async fn update_summary_missing_summary_field_is_422() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let response = app
        .client
        .put(app.url(&format!("/summaries/{}/", id)))
        .json(&json!({ "url": "https://example.com/" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "detail": [
                {
                    "type": "missing",
                    "loc": ["body", "summary"],
                    "msg": "Field required",
                    "input": { "url": "https://example.com/" },
                }
            ]
        })
    );
}

#[tokio::test]
async fn update_summary_invalid_url_is_422() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .put(app.url("/summaries/1/"))
        .json(&json!({ "url": "invalid://url", "summary": "updated!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["detail"][0]["msg"],
        "URL scheme should be 'http' or 'https'"
    );
}

#[tokio::test]
async fn delete_summary_returns_id_and_url() {
    let app = TestApp::spawn().await;
    let id = app.create("https://example.com/").await;

    let response = app
        .client
        .delete(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "id": id, "url": "https://example.com/" }));

    // The record is gone and a second delete is a 404
    let read = app
        .client
        .get(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(read.status(), 404);

    let again = app
        .client
        .delete(app.url(&format!("/summaries/{}/", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn delete_summary_missing_id_is_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .delete(app.url("/summaries/999/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Summary not found");
}

#[tokio::test]
async fn routes_work_without_trailing_slash() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/summaries"))
        .json(&json!({ "url": "https://example.com/" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = app.client.get(app.url("/summaries/1")).send().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn malformed_json_body_is_422() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/summaries/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}
