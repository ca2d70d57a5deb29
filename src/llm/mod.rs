//! LLM: upstream text-generation adapter for symptom analysis.
//!
//! DESIGN
//! ======
//! One provider shape: an OpenAI-compatible chat-completions endpoint, which
//! is what the hosted AI gateway exposes. Model id, base URL and credential are
//! configuration only. Handlers depend on the [`LlmChat`] trait, never on the
//! concrete client, so tests substitute a mock.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Chat-completions client pinned to the configured model and token cap.
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
    max_tokens: Option<u32>,
}

impl LlmClient {
    /// # Errors
    ///
    /// [`LlmError::MissingApiKey`] or [`LlmError::ConfigParse`] from
    /// [`LlmConfig::from_env`], or a client build failure.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// # Errors
    ///
    /// [`LlmError::HttpClientBuild`] when reqwest cannot set up TLS.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner
            .chat(&self.model, self.max_tokens, messages)
            .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
