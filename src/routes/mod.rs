//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser app calls this service cross-origin, so every route sits
//! behind a permissive CORS layer that also answers `OPTIONS` preflights with
//! an empty body. The analysis route is mounted twice: once under `/api` and
//! once at the path the hosted-function client already calls.

pub mod analyze;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/analyze-symptoms", post(analyze::analyze_symptoms))
        .route("/functions/v1/analyze-symptoms", post(analyze::analyze_symptoms))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
