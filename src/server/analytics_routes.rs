//! Analytics ingestion and the admin stats snapshot.
//!
//! Ingestion is anonymous; stats require the API key.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error};

use crate::analytics::{AnalyticsError, EventReport, Heartbeat};
use crate::server::api_key::AdminAccess;
use crate::server::metrics::record_analytics_ingestion;
use crate::server::state::{GuardedAnalyticsAggregator, ServerState};

fn analytics_error_response(kind: &str, err: AnalyticsError) -> Response {
    match err {
        AnalyticsError::InvalidEvent(_) | AnalyticsError::InvalidTimestamp(_) => {
            record_analytics_ingestion(kind, "rejected");
            debug!("Rejected {}: {}", kind, err);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": err.to_string() })),
            )
                .into_response()
        }
        AnalyticsError::Store(e) => {
            record_analytics_ingestion(kind, "error");
            error!("Failed to handle {}: {:#}", kind, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
                .into_response()
        }
    }
}

/// POST /analytics/heartbeat
async fn post_heartbeat(
    State(analytics): State<GuardedAnalyticsAggregator>,
    Json(heartbeat): Json<Heartbeat>,
) -> Response {
    match analytics.record_heartbeat(&heartbeat) {
        Ok(()) => {
            record_analytics_ingestion("heartbeat", "ok");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => analytics_error_response("heartbeat", e),
    }
}

/// POST /analytics/event
async fn post_event(
    State(analytics): State<GuardedAnalyticsAggregator>,
    Json(report): Json<EventReport>,
) -> Response {
    match analytics.record_event(&report) {
        Ok(()) => {
            record_analytics_ingestion("event", "ok");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => analytics_error_response("event", e),
    }
}

/// GET /admin/stats
async fn get_admin_stats(
    _access: AdminAccess,
    State(analytics): State<GuardedAnalyticsAggregator>,
) -> Response {
    match analytics.compute_stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => analytics_error_response("stats", e),
    }
}

pub fn analytics_routes() -> Router<ServerState> {
    Router::new()
        .route("/analytics/heartbeat", post(post_heartbeat))
        .route("/analytics/event", post(post_event))
        .route("/admin/stats", get(get_admin_stats))
}
