//! HTTP transport from a checker session to a running proxy.
//!
//! Every outcome is folded into a [`TriageFailure`] so the session can pick a
//! notice: network errors and unreadable success bodies count as the upstream
//! being unavailable, and error statuses are mapped by body code first, then
//! by status.

use std::time::Duration;

use triage::{ErrorBody, ErrorKind, TriageFailure, TriageRequest, TriageResponse, TriageTransport};

pub const ANALYZE_PATH: &str = "/api/analyze-symptoms";

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}{ANALYZE_PATH}", base_url.trim_end_matches('/'));
        Ok(Self { http, endpoint })
    }
}

#[async_trait::async_trait]
impl TriageTransport for HttpTransport {
    async fn classify(&self, request: &TriageRequest) -> Result<TriageResponse, TriageFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TriageFailure::new(ErrorKind::UpstreamUnavailable, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<TriageResponse>().await.map_err(|e| {
                TriageFailure::new(ErrorKind::UpstreamUnavailable, format!("invalid analysis response: {e}"))
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let kind = ErrorKind::from_response(status.as_u16(), None);
                return Err(TriageFailure::new(kind, format!("HTTP {}: unreadable error body: {e}", status.as_u16())));
            }
        };
        let parsed = serde_json::from_str::<ErrorBody>(&body).ok();
        let kind = ErrorKind::from_response(status.as_u16(), parsed.as_ref().and_then(|b| b.code.as_deref()));
        let message = match parsed {
            Some(err) => err.error,
            None if body.is_empty() => format!("HTTP {}", status.as_u16()),
            None => body,
        };
        Err(TriageFailure::new(kind, message))
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
