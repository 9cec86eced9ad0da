#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use formfilter::config::Config;
use formfilter::models::SubmissionsPage;
use formfilter::query::QueryOptions;
use formfilter::upstream::{SubmissionSource, UpstreamError};

/// Upstream stand-in that serves a fixed page and counts how often it is asked.
pub struct StubSource {
    page: SubmissionsPage,
    calls: AtomicUsize,
    last_options: Mutex<Option<QueryOptions>>,
}

impl StubSource {
    pub fn new(page: SubmissionsPage) -> Self {
        Self {
            page,
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<QueryOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSource for StubSource {
    async fn fetch(
        &self,
        _form_id: &str,
        options: &QueryOptions,
    ) -> Result<SubmissionsPage, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options.clone());
        Ok(self.page.clone())
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET `/{form_id}/filteredResponses` with the given query pairs.
    pub async fn filtered(&self, form_id: &str, query: &[(&str, &str)]) -> (Value, StatusCode) {
        let mut url = reqwest::Url::parse(&self.url(&format!("/{form_id}/filteredResponses")))
            .expect("bad test url");
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .expect("filtered responses request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn the router on a random port in front of the given source.
pub async fn spawn_app(source: Arc<dyn SubmissionSource>) -> TestApp {
    let app = formfilter::build_app(source);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        api_key: "test-api-key".to_string(),
        api_base_url: api_base_url.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        upstream_timeout: Duration::from_secs(5),
        log_level: "warn".to_string(),
    }
}

// ── Fixtures ────────────────────────────────────────────────────

pub fn question(id: &str, field_type: &str, value: Value) -> Value {
    json!({ "id": id, "name": format!("Question {id}"), "type": field_type, "value": value })
}

pub fn submission_json(id: &str, questions: Vec<Value>) -> Value {
    json!({
        "submissionId": id,
        "submissionTime": "2024-02-01T10:00:00.000Z",
        "lastUpdatedAt": "2024-02-01T10:05:00.000Z",
        "questions": questions,
        "calculations": [
            { "id": "calc1", "name": "Price", "type": "number", "value": 42 }
        ],
        "urlParameters": [
            { "id": "ref", "name": "ref", "value": "newsletter" }
        ],
        "quiz": {}
    })
}

pub fn page_json(responses: Vec<Value>) -> Value {
    let total = responses.len();
    json!({ "responses": responses, "totalResponses": total, "pageCount": 1 })
}

pub fn page(responses: Vec<Value>) -> SubmissionsPage {
    serde_json::from_value(page_json(responses)).expect("fixture page must parse")
}

/// Three submissions: only `sub-yes` answered "yes" to q1.
pub fn yes_no_page() -> SubmissionsPage {
    page(vec![
        submission_json("sub-yes", vec![question("q1", "MultipleChoice", json!("yes"))]),
        submission_json("sub-no", vec![question("q1", "MultipleChoice", json!("no"))]),
        submission_json("sub-maybe", vec![question("q1", "MultipleChoice", json!("maybe"))]),
    ])
}
