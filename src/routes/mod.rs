//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page itself is static and served elsewhere; this router only carries
//! the same-origin endpoints the page calls. CORS is open to any origin with
//! the common methods and headers.

pub mod generate;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, DATE, HeaderName};
use axum::http::{Method, StatusCode};
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS, Method::PATCH, Method::DELETE, Method::POST, Method::PUT])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            ACCEPT,
            HeaderName::from_static("accept-version"),
            CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            CONTENT_TYPE,
            DATE,
            HeaderName::from_static("x-api-version"),
        ])
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", any(generate::generate))
        .route("/healthz", get(healthz))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
