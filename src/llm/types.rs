//! Upstream exchange types shared by the client, the analysis service and mocks.

use serde::Serialize;
use triage::ErrorKind;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("invalid upstream config: {0}")]
    ConfigParse(String),

    /// The credential variable named by `LLM_API_KEY_ENV` is unset or blank.
    #[error("missing upstream credential: env var {var} not set")]
    MissingApiKey { var: String },

    /// Connect failure, timeout, or an unreadable body.
    #[error("upstream request failed: {0}")]
    ApiRequest(String),

    /// Non-2xx status. `body` is kept for logs and never shown to callers.
    #[error("upstream returned status {status}")]
    ApiResponse { status: u16, body: String },

    #[error("upstream reply unreadable: {0}")]
    ApiParse(String),

    #[error("could not build upstream HTTP client: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Where this failure lands in the triage error taxonomy.
    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::ApiResponse { status, .. } => match status {
                429 => ErrorKind::RateLimited,
                402 => ErrorKind::QuotaExceeded,
                _ => ErrorKind::UpstreamUnavailable,
            },
            Self::ApiRequest(_) | Self::ApiParse(_) => ErrorKind::UpstreamUnavailable,
            Self::ConfigParse(_) | Self::MissingApiKey { .. } | Self::HttpClientBuild(_) => ErrorKind::Misconfigured,
        }
    }
}

// =============================================================================
// EXCHANGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One role-tagged message of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }
}

/// First choice of an upstream reply.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// `None` when the upstream returned no content.
    pub text: Option<String>,
    pub model: String,
    /// `max_tokens` when the reply was cut off, otherwise `end_turn`.
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Seam between the analysis service and the upstream model.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send one exchange, system message first.
    ///
    /// # Errors
    ///
    /// Any [`LlmError`]; callers map it with [`LlmError::error_kind`].
    async fn chat(&self, messages: &[Message]) -> Result<ChatResponse, LlmError>;

    fn model(&self) -> &str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
