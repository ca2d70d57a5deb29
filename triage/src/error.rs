//! Error taxonomy shared by the proxy and its callers.

use std::fmt;

/// Distinct failure outcomes a caller must surface separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Upstream model provider throttled the request.
    RateLimited,
    /// Upstream model provider requires payment or credits.
    QuotaExceeded,
    /// Any other upstream failure: non-2xx, malformed body, network, timeout.
    UpstreamUnavailable,
    /// Deployment error, e.g. no upstream credential. Never retry.
    Misconfigured,
    /// Request rejected before any upstream call.
    InvalidInput,
}

impl ErrorKind {
    /// Stable machine-readable code carried in error bodies.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RateLimited => "E_RATE_LIMITED",
            Self::QuotaExceeded => "E_QUOTA_EXCEEDED",
            Self::UpstreamUnavailable => "E_UPSTREAM_UNAVAILABLE",
            Self::Misconfigured => "E_MISCONFIGURED",
            Self::InvalidInput => "E_INVALID_INPUT",
        }
    }

    /// HTTP status the proxy answers with.
    #[must_use]
    pub fn http_status(self) -> u16 {
        match self {
            Self::RateLimited => 429,
            Self::QuotaExceeded => 402,
            Self::UpstreamUnavailable => 502,
            Self::Misconfigured => 500,
            Self::InvalidInput => 400,
        }
    }

    /// Whether a caller may reasonably try the same request again later.
    #[must_use]
    pub fn retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::UpstreamUnavailable)
    }

    /// Inverse of [`ErrorKind::code`].
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E_RATE_LIMITED" => Some(Self::RateLimited),
            "E_QUOTA_EXCEEDED" => Some(Self::QuotaExceeded),
            "E_UPSTREAM_UNAVAILABLE" => Some(Self::UpstreamUnavailable),
            "E_MISCONFIGURED" => Some(Self::Misconfigured),
            "E_INVALID_INPUT" => Some(Self::InvalidInput),
            _ => None,
        }
    }

    /// Recover the kind from a non-2xx proxy response.
    ///
    /// A recognized `code` in the body wins; otherwise only 429 and 402 are
    /// meaningful and every other status is a generic upstream failure.
    #[must_use]
    pub fn from_response(status: u16, code: Option<&str>) -> Self {
        if let Some(kind) = code.and_then(Self::from_code) {
            return kind;
        }
        match status {
            429 => Self::RateLimited,
            402 => Self::QuotaExceeded,
            _ => Self::UpstreamUnavailable,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RateLimited => "rate limited",
            Self::QuotaExceeded => "quota exceeded",
            Self::UpstreamUnavailable => "upstream unavailable",
            Self::Misconfigured => "misconfigured",
            Self::InvalidInput => "invalid input",
        };
        f.write_str(name)
    }
}

/// Typed failure of one classify call: `{ kind, message }`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TriageFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl TriageFailure {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

/// Why a conversation session refused a submission.
///
/// Either way the transcript is left untouched and no call is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("symptom description is empty")]
    Empty,
    #[error("an analysis is already in progress")]
    Busy,
}

impl SubmitError {
    /// Taxonomy kind, if the rejection is an error rather than a guard.
    #[must_use]
    pub fn kind(self) -> Option<ErrorKind> {
        match self {
            Self::Empty => Some(ErrorKind::InvalidInput),
            Self::Busy => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 5] = [
        ErrorKind::RateLimited,
        ErrorKind::QuotaExceeded,
        ErrorKind::UpstreamUnavailable,
        ErrorKind::Misconfigured,
        ErrorKind::InvalidInput,
    ];

    #[test]
    fn codes_round_trip() {
        for kind in ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ErrorKind::from_code("E_SOMETHING_ELSE"), None);
    }

    #[test]
    fn status_fallback_mapping() {
        assert_eq!(ErrorKind::from_response(429, None), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_response(402, None), ErrorKind::QuotaExceeded);
        assert_eq!(ErrorKind::from_response(500, None), ErrorKind::UpstreamUnavailable);
        assert_eq!(ErrorKind::from_response(404, Some("E_NOPE")), ErrorKind::UpstreamUnavailable);
    }

    #[test]
    fn body_code_wins_over_status() {
        assert_eq!(ErrorKind::from_response(500, Some("E_MISCONFIGURED")), ErrorKind::Misconfigured);
        assert_eq!(ErrorKind::from_response(400, Some("E_INVALID_INPUT")), ErrorKind::InvalidInput);
    }

    #[test]
    fn misconfigured_is_never_retryable() {
        assert!(!ErrorKind::Misconfigured.retryable());
        assert!(!ErrorKind::QuotaExceeded.retryable());
        assert!(ErrorKind::RateLimited.retryable());
    }

    #[test]
    fn failure_display_includes_kind() {
        let failure = TriageFailure::new(ErrorKind::RateLimited, "slow down");
        assert_eq!(failure.to_string(), "rate limited: slow down");
    }
}
