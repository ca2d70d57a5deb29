//! JSON bodies exchanged with the `analyze-symptoms` endpoint.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::level::TriageLevel;

/// Request body: `{ "symptoms": "...", "userId": "..." }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    /// Free-text symptom description, forwarded verbatim.
    #[serde(default)]
    pub symptoms: String,
    /// Opaque identifier of the signed-in user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Success body: `{ "analysis": "...", "triageLevel": "red", "timestamp": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResponse {
    /// Raw model text, never reformatted.
    pub analysis: String,
    pub triage_level: TriageLevel,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Error body returned with any non-2xx status.
///
/// Only `error` is guaranteed; `code` and `retryable` are filled in by this
/// service and treated as optional when reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}
