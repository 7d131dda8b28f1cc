//! `/api/generate`: credential-injecting forwarder to the generation API.
//!
//! `OPTIONS` answers 200 with no body, anything but `POST` is a 405, and a
//! `POST` is relayed to the upstream API with the server-held key. The
//! upstream JSON comes back verbatim with 200 whatever its own status was.
//! Every failure on the way is a generic 500.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::state::AppState;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: String,
}

/// `ANY /api/generate`.
pub async fn generate(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
    }

    let Some(upstream) = state.upstream.as_ref() else {
        error!("generate: server API key missing");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
    };

    let request = match parse_body(&body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "generate: unreadable request body");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    match upstream.generate_content(&request.prompt).await {
        Ok(reply) => {
            info!(upstream_status = reply.status, prompt_len = request.prompt.len(), "generate: relayed");
            (StatusCode::OK, Json(reply.body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "generate: upstream call failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

/// An empty body is an empty prompt; the upstream decides what that means.
pub(crate) fn parse_body(body: &[u8]) -> Result<GenerateBody, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateBody::default());
    }
    serde_json::from_slice(body)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
