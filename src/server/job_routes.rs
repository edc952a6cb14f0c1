//! Job application routes. Listing is public, mutations require the API key.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error};

use crate::jobs::{JobError, JobPayload};
use crate::server::api_key::AdminAccess;
use crate::server::metrics::record_job_operation;
use crate::server::state::{GuardedJobManager, ServerState};

fn job_error_response(operation: &str, err: JobError) -> Response {
    match err {
        JobError::Validation(msg) => {
            record_job_operation(operation, "invalid");
            debug!("Rejected job {}: {}", operation, msg);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": msg })),
            )
                .into_response()
        }
        // Soft failure, clients check the `error` field
        JobError::NotFound(id) => {
            record_job_operation(operation, "not_found");
            debug!("Job {} not found for {}", id, operation);
            Json(json!({ "error": "Job not found" })).into_response()
        }
        JobError::Store(e) => {
            record_job_operation(operation, "error");
            error!("Job {} failed: {:#}", operation, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
                .into_response()
        }
    }
}

/// GET /jobs
async fn list_jobs(State(jobs): State<GuardedJobManager>) -> Response {
    match jobs.list_jobs() {
        Ok(list) => {
            record_job_operation("list", "ok");
            Json(list).into_response()
        }
        Err(e) => job_error_response("list", e),
    }
}

/// POST /jobs
async fn create_job(
    _access: AdminAccess,
    State(jobs): State<GuardedJobManager>,
    Json(payload): Json<JobPayload>,
) -> Response {
    match jobs.create_job(&payload) {
        Ok(job) => {
            record_job_operation("create", "ok");
            Json(job).into_response()
        }
        Err(e) => job_error_response("create", e),
    }
}

/// PUT /jobs/{id}
async fn update_job(
    _access: AdminAccess,
    State(jobs): State<GuardedJobManager>,
    Path(id): Path<i64>,
    Json(payload): Json<JobPayload>,
) -> Response {
    match jobs.update_job(id, &payload) {
        Ok(job) => {
            record_job_operation("update", "ok");
            Json(job).into_response()
        }
        Err(e) => job_error_response("update", e),
    }
}

/// DELETE /jobs/{id}
async fn delete_job(
    _access: AdminAccess,
    State(jobs): State<GuardedJobManager>,
    Path(id): Path<i64>,
) -> Response {
    match jobs.delete_job(id) {
        Ok(()) => {
            record_job_operation("delete", "ok");
            Json(json!({ "message": "Job deleted" })).into_response()
        }
        Err(e) => job_error_response("delete", e),
    }
}

/// Build the job routes. Both `/jobs` and `/jobs/` are served.
pub fn job_routes() -> Router<ServerState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/", get(list_jobs).post(create_job))
        .route("/jobs/{id}", put(update_job).delete(delete_job))
}
