use super::state::ServerState;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

pub const HEADER_ADMIN_KEY: &str = "X-Admin-Key";
pub const QUERY_ADMIN_KEY: &str = "key";

/// Proof that the request carried the configured API key, either in the
/// `X-Admin-Key` header or in the `key` query parameter.
#[derive(Debug)]
pub struct AdminAccess;

pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Unauthorized" })),
        )
            .into_response()
    }
}

fn extract_key_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(HEADER_ADMIN_KEY)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn extract_key_from_query(parts: &Parts) -> Option<String> {
    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(mut params)| params.remove(QUERY_ADMIN_KEY))
}

impl FromRequestParts<ServerState> for AdminAccess {
    type Rejection = Unauthorized;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = ctx.config.api_key.as_deref() else {
            debug!("Rejecting {}: no API key configured", parts.uri.path());
            return Err(Unauthorized);
        };

        let provided = extract_key_from_headers(parts).or_else(|| extract_key_from_query(parts));
        match provided {
            Some(key) if key == expected => Ok(AdminAccess),
            Some(_) => {
                debug!("Rejecting {}: wrong API key", parts.uri.path());
                Err(Unauthorized)
            }
            None => {
                debug!("Rejecting {}: no API key provided", parts.uri.path());
                Err(Unauthorized)
            }
        }
    }
}
