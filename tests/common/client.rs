//! HTTP client for end-to-end tests
//!
//! This module wraps reqwest and provides methods for every server endpoint.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client, optionally sending the admin key on guarded routes
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    api_key: Option<String>,
}

impl TestClient {
    /// Creates a client that sends no admin key
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            api_key: None,
        }
    }

    /// Creates a client sending `TEST_API_KEY` in the `X-Admin-Key` header
    pub fn admin(base_url: String) -> Self {
        Self::with_api_key(base_url, TEST_API_KEY)
    }

    pub fn with_api_key(base_url: String, api_key: &str) -> Self {
        let mut client = Self::new(base_url);
        client.api_key = Some(api_key.to_string());
        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn guarded(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("X-Admin-Key", key),
            None => builder,
        }
    }

    // ========================================================================
    // Home
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// GET /jobs/
    pub async fn list_jobs(&self) -> Response {
        self.guarded(self.client.get(self.url("/jobs/")))
            .send()
            .await
            .expect("List jobs request failed")
    }

    /// POST /jobs/
    pub async fn create_job(&self, body: &Value) -> Response {
        self.guarded(self.client.post(self.url("/jobs/")))
            .json(body)
            .send()
            .await
            .expect("Create job request failed")
    }

    /// POST /jobs/ with only the required fields, returning the stored job
    pub async fn create_simple_job(&self, title: &str, company: &str) -> Value {
        let response = self
            .create_job(&json!({ "title": title, "company": company }))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Invalid job JSON")
    }

    /// PUT /jobs/{id}
    pub async fn update_job(&self, id: i64, body: &Value) -> Response {
        self.guarded(self.client.put(self.url(&format!("/jobs/{}", id))))
            .json(body)
            .send()
            .await
            .expect("Update job request failed")
    }

    /// DELETE /jobs/{id}
    pub async fn delete_job(&self, id: i64) -> Response {
        self.guarded(self.client.delete(self.url(&format!("/jobs/{}", id))))
            .send()
            .await
            .expect("Delete job request failed")
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    /// POST /analytics/heartbeat
    pub async fn heartbeat(&self, install_id: &str, mode: &str, ts: i64) -> Response {
        self.client
            .post(self.url("/analytics/heartbeat"))
            .json(&json!({
                "id": install_id,
                "mode": mode,
                "version": TEST_VERSION,
                "ts": ts
            }))
            .send()
            .await
            .expect("Heartbeat request failed")
    }

    /// POST /analytics/event
    pub async fn event(&self, install_id: &str, event: &str, ts: i64) -> Response {
        self.client
            .post(self.url("/analytics/event"))
            .json(&json!({
                "id": install_id,
                "event": event,
                "ts": ts
            }))
            .send()
            .await
            .expect("Event request failed")
    }

    /// GET /admin/stats
    pub async fn stats(&self) -> Response {
        self.guarded(self.client.get(self.url("/admin/stats")))
            .send()
            .await
            .expect("Stats request failed")
    }

    /// GET /admin/stats?key=...
    pub async fn stats_with_query_key(&self, key: &str) -> Response {
        self.client
            .get(self.url("/admin/stats"))
            .query(&[("key", key)])
            .send()
            .await
            .expect("Stats request failed")
    }
}
