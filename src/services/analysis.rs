//! Analysis service: symptom text to upstream model to classified analysis.
//!
//! DESIGN
//! ======
//! Stateless: each call builds one exchange (system instruction + the user's
//! text), makes exactly one upstream call, and classifies the returned text
//! with [`triage::classify_text`]. Upstream failures are mapped to the triage
//! error taxonomy and returned as-is; nothing is retried here.
//!
//! Symptom text is health data. It is sent upstream but never logged; log
//! events carry the user id, lengths, the level and token counts.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{error, info, warn};
use triage::{ErrorKind, TriageLevel, TriageRequest, TriageResponse, classify_text};
use uuid::Uuid;

use super::prompt::{SYSTEM_PROMPT, user_turn};
use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

/// Analysis text used when the model returns no content.
pub const EMPTY_ANALYSIS: &str = "Unable to analyze symptoms";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("AI service requires payment. Please add credits.")]
    QuotaExceeded,
    #[error("AI gateway error")]
    UpstreamUnavailable(#[source] LlmError),
    #[error("symptom analysis is not configured: {0}")]
    Misconfigured(String),
}

impl TriageError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited => ErrorKind::RateLimited,
            Self::QuotaExceeded => ErrorKind::QuotaExceeded,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::Misconfigured(_) => ErrorKind::Misconfigured,
        }
    }
}

impl From<LlmError> for TriageError {
    fn from(e: LlmError) -> Self {
        match e.error_kind() {
            ErrorKind::RateLimited => Self::RateLimited,
            ErrorKind::QuotaExceeded => Self::QuotaExceeded,
            ErrorKind::Misconfigured => Self::Misconfigured(e.to_string()),
            ErrorKind::UpstreamUnavailable | ErrorKind::InvalidInput => Self::UpstreamUnavailable(e),
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Analyze one symptom description.
///
/// `llm` is `None` when the service started without a usable upstream
/// configuration; that fails fast as [`TriageError::Misconfigured`] without
/// any outbound call.
///
/// # Errors
///
/// See [`TriageError`]; each variant corresponds to one [`ErrorKind`].
pub async fn classify(llm: Option<&Arc<dyn LlmChat>>, request: &TriageRequest) -> Result<TriageResponse, TriageError> {
    let request_id = Uuid::new_v4();
    let user_id = request.user_id.as_deref().unwrap_or("anonymous");

    let Some(llm) = llm else {
        error!(%request_id, user_id, "triage: LLM client not configured");
        return Err(TriageError::Misconfigured("no upstream credential configured".into()));
    };

    info!(%request_id, user_id, symptoms_len = request.symptoms.len(), model = llm.model(), "triage: analyzing");

    let messages = [Message::system(SYSTEM_PROMPT), Message::user(user_turn(&request.symptoms))];
    let response = llm.chat(&messages).await.map_err(|e| {
        match &e {
            LlmError::ApiResponse { status, body } => {
                warn!(%request_id, user_id, status, body = %truncate(body, 512), "triage: upstream error status");
            }
            other => warn!(%request_id, user_id, error = %other, "triage: upstream call failed"),
        }
        TriageError::from(e)
    })?;

    let analysis = response
        .text
        .unwrap_or_else(|| EMPTY_ANALYSIS.to_string());
    let triage_level: TriageLevel = classify_text(&analysis);

    info!(
        %request_id,
        user_id,
        %triage_level,
        upstream_model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "triage: analysis complete"
    );

    Ok(TriageResponse { analysis, triage_level, timestamp: OffsetDateTime::now_utc() })
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
