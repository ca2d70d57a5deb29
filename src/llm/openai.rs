//! OpenAI-compatible `/chat/completions` client.
//!
//! Works against any gateway that speaks the chat-completions wire format.
//! Non-2xx statuses are returned untouched as [`LlmError::ApiResponse`] so the
//! caller can tell throttling (429) and payment (402) apart from other failures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Message};

const COMPLETIONS_PATH: &str = "/chat/completions";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        let endpoint = format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/'));
        Ok(Self { http, api_key, endpoint })
    }

    /// Send one exchange and return the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ApiRequest`] on transport failure, [`LlmError::ApiResponse`]
    /// on a non-2xx status, and [`LlmError::ApiParse`] on a malformed body.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: Option<u32>,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest { model, max_tokens, messages })
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(LlmError::ApiResponse { status, body });
        }
        parse_chat_completions_response(&body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Reduce a completions body to the first choice's text and token counts.
/// A missing choice, message or content, or empty content, all count as no
/// content. Only a body that is not a JSON object is an error.
pub(crate) fn parse_chat_completions_response(body: &str) -> Result<ChatResponse, LlmError> {
    let parsed: CompletionResponse = serde_json::from_str(body).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let choice = parsed.choices.into_iter().next();

    let stop_reason = match choice.as_ref().and_then(|c| c.finish_reason.as_deref()) {
        Some("length") => "max_tokens",
        _ => "end_turn",
    };
    let text = choice
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.is_empty());

    Ok(ChatResponse {
        text,
        model: parsed.model,
        stop_reason: stop_reason.into(),
        input_tokens: parsed.usage.prompt_tokens,
        output_tokens: parsed.usage.completion_tokens,
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
