//! Handler state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! proxy keeps no per-request or per-user state, so the only shared value is
//! the upstream client, which is immutable after startup.

use std::sync::Arc;

use crate::llm::LlmChat;

#[derive(Clone)]
pub struct AppState {
    /// Upstream model client. `None` when LLM env vars are missing or invalid;
    /// every analysis request then fails fast as misconfigured.
    pub llm: Option<Arc<dyn LlmChat>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { llm }
    }
}
