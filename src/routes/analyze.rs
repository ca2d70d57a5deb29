//! Symptom analysis route.
//!
//! `POST /api/analyze-symptoms` with `{ symptoms, userId? }`. Success is
//! `200 { analysis, triageLevel, timestamp }`; failures carry
//! `{ error, code, retryable }` with a status per [`triage::ErrorKind`].

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;
use triage::{ErrorBody, ErrorKind, TriageRequest};

use crate::services::analysis;
use crate::state::AppState;

/// `POST /api/analyze-symptoms`: classify one symptom description.
pub async fn analyze_symptoms(
    State(state): State<AppState>,
    payload: Result<Json<TriageRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "analyze: rejected request body");
            return error_response(ErrorKind::InvalidInput, rejection.body_text());
        }
    };

    match analysis::classify(state.llm.as_ref(), &request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err.kind(), err.to_string()),
    }
}

pub(crate) fn error_response(kind: ErrorKind, message: String) -> Response {
    let status = StatusCode::from_u16(kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorBody { error: message, code: Some(kind.code().to_string()), retryable: Some(kind.retryable()) };
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
