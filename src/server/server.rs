use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{info, warn};

use axum::{
    extract::State,
    http::HeaderValue,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::analytics_routes::analytics_routes;
use super::job_routes::job_routes;
use super::metrics::metrics_handler;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub message: &'static str,
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        message: "Job Tracker API is live",
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    })
}

fn make_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers mirror the request
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn make_app(state: ServerState) -> Router {
    let cors = make_cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(home))
        .merge(job_routes())
        .merge(analytics_routes())
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(cors)
        .with_state(state)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn run_server(
    config: ServerConfig,
    job_manager: GuardedJobManager,
    analytics: GuardedAnalyticsAggregator,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let state = ServerState::new(config, job_manager, analytics);
    let app = make_app(state);

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, make_metrics_app()).await {
            warn!("Metrics server stopped: {}", e);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsAggregator, SqliteAnalyticsStore};
    use crate::jobs::{JobManager, SqliteJobStore};
    use crate::server::RequestsLoggingLevel;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt; // for `oneshot`

    const API_KEY: &str = "test-admin-key";

    fn make_test_app(api_key: Option<&str>) -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let job_store = SqliteJobStore::new(temp_dir.path().join("jobs.db")).unwrap();
        let analytics_store =
            SqliteAnalyticsStore::new(temp_dir.path().join("analytics.db")).unwrap();
        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            api_key: api_key.map(String::from),
            ..Default::default()
        };
        let state = ServerState::new(
            config,
            Arc::new(JobManager::new(Arc::new(job_store))),
            Arc::new(AnalyticsAggregator::new(Arc::new(analytics_store))),
        );
        (make_app(state), temp_dir)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "1d 01:01:01");
    }

    #[tokio::test]
    async fn home_reports_liveness() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Job Tracker API is live");
        assert!(body["uptime"].is_string());
        assert!(body["hash"].is_string());
    }

    #[tokio::test]
    async fn responds_unauthorized_on_protected_routes() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let protected_routes = vec![
            ("POST", "/jobs"),
            ("POST", "/jobs/"),
            ("PUT", "/jobs/1"),
            ("DELETE", "/jobs/1"),
            ("GET", "/admin/stats"),
        ];

        for (method, route) in protected_routes.into_iter() {
            let request = json_request(
                method,
                route,
                serde_json::json!({"title": "t", "company": "c"}),
            );
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{} {}",
                method,
                route
            );
            assert_eq!(body_json(response).await["detail"], "Unauthorized");
        }
    }

    #[tokio::test]
    async fn job_listing_is_public() {
        let (app, _dir) = make_test_app(None);

        for route in ["/jobs", "/jobs/"] {
            let request = Request::builder().uri(route).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{}", route);
            assert_eq!(body_json(response).await, serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn wrong_key_is_rejected() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let request = Request::builder()
            .uri("/admin/stats")
            .header("X-Admin-Key", "nope")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unconfigured_key_rejects_guarded_routes() {
        let (app, _dir) = make_test_app(None);

        let request = Request::builder()
            .method("DELETE")
            .uri("/jobs/1")
            .header("X-Admin-Key", "")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn key_accepted_from_header_or_query() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let request = Request::builder()
            .uri("/admin/stats")
            .header("X-Admin-Key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri(format!("/admin/stats?key={}", API_KEY))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["unique_installs"], 0);
    }

    #[tokio::test]
    async fn analytics_ingestion_needs_no_key() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let request = json_request(
            "POST",
            "/analytics/heartbeat",
            serde_json::json!({
                "id": "2f1c3a9e-4a7b-4c6d-9e1f-0a2b3c4d5e6f",
                "mode": "demo",
                "version": "1.2.0",
                "ts": 1_700_000_000
            }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let request = json_request(
            "POST",
            "/analytics/event",
            serde_json::json!({
                "id": "2f1c3a9e-4a7b-4c6d-9e1f-0a2b3c4d5e6f",
                "event": "job_create_demo",
                "ts": 1_700_000_000_000i64
            }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn malformed_analytics_is_unprocessable() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let bad_requests = vec![
            (
                "/analytics/heartbeat",
                serde_json::json!({"id": "not-a-uuid", "mode": "demo", "version": "1", "ts": 1}),
            ),
            (
                "/analytics/heartbeat",
                serde_json::json!({
                    "id": "2f1c3a9e-4a7b-4c6d-9e1f-0a2b3c4d5e6f",
                    "mode": "cloud",
                    "version": "1",
                    "ts": 1
                }),
            ),
            (
                "/analytics/event",
                serde_json::json!({
                    "id": "2f1c3a9e-4a7b-4c6d-9e1f-0a2b3c4d5e6f",
                    "event": "bogus_event",
                    "ts": 1
                }),
            ),
        ];

        for (route, body) in bad_requests {
            let response = app
                .clone()
                .oneshot(json_request("POST", route, body.clone()))
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "{} {}",
                route,
                body
            );
        }
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let (app, _dir) = make_test_app(Some(API_KEY));

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/jobs/")
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "x-admin-key")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()["access-control-allow-credentials"],
            "true"
        );
    }
}
