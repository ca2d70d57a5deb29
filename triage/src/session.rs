//! Conversation session: one symptom-checker transcript and its request guard.
//!
//! DESIGN
//! ======
//! [`Session`] is a two-state machine. `begin` moves `Idle -> Awaiting` and
//! records the user turn; `complete` moves `Awaiting -> Idle` and records the
//! assistant turn. A submission while `Awaiting` is refused without touching
//! the transcript, which is what keeps at most one classify call in flight.
//!
//! [`SymptomChecker`] wires a session to a [`CheckerContext`] and performs the
//! network call between the two transitions.
//!
//! Every failure ends in `Idle` with a visible assistant apology, so the user
//! can always try again.

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::context::CheckerContext;
use crate::error::{ErrorKind, SubmitError, TriageFailure};
use crate::level::TriageLevel;
use crate::wire::{TriageRequest, TriageResponse};

/// Assistant text shown in place of an analysis when a call fails.
pub const APOLOGY: &str = "I'm sorry, I encountered an error analyzing your symptoms. \
Please try again or contact emergency services if this is urgent.";

// =============================================================================
// TURNS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message of the transcript. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationTurn {
    role: Role,
    content: String,
    triage_level: Option<TriageLevel>,
    created_at: OffsetDateTime,
}

impl ConversationTurn {
    fn user(content: String) -> Self {
        Self { role: Role::User, content, triage_level: None, created_at: OffsetDateTime::now_utc() }
    }

    fn assistant(content: String, triage_level: Option<TriageLevel>) -> Self {
        Self { role: Role::Assistant, content, triage_level, created_at: OffsetDateTime::now_utc() }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Always `None` for user turns and for failed assistant turns.
    #[must_use]
    pub fn triage_level(&self) -> Option<TriageLevel> {
        self.triage_level
    }

    #[must_use]
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

// =============================================================================
// NOTICES
// =============================================================================

/// Transient notification accompanying a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    AnalysisComplete,
    RateLimited,
    QuotaExceeded,
    Misconfigured,
    AnalysisFailed,
    NewCheck,
}

impl Notice {
    fn for_error(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::RateLimited => Self::RateLimited,
            ErrorKind::QuotaExceeded => Self::QuotaExceeded,
            ErrorKind::Misconfigured => Self::Misconfigured,
            ErrorKind::UpstreamUnavailable | ErrorKind::InvalidInput => Self::AnalysisFailed,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AnalysisComplete => "Analysis complete! Review the recommendations below.",
            Self::RateLimited => "Rate limit exceeded. Please try again in a moment.",
            Self::QuotaExceeded => "AI service requires credits. Please contact support.",
            Self::Misconfigured => "Symptom analysis is not configured. Please contact support.",
            Self::AnalysisFailed => "Failed to analyze symptoms. Please try again.",
            Self::NewCheck => "Starting a new symptom check. Previous conversation cleared.",
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        !matches!(self, Self::AnalysisComplete | Self::NewCheck)
    }
}

// =============================================================================
// SESSION STATE MACHINE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No request outstanding.
    Idle,
    /// Exactly one classify call outstanding.
    Awaiting,
}

/// Ordered transcript for one checker session.
#[derive(Debug)]
pub struct Session {
    turns: Vec<ConversationTurn>,
    state: SessionState,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self { turns: Vec::new(), state: SessionState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// `Idle -> Awaiting`: record the user turn and build the proxy request.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Empty`] for blank text, [`SubmitError::Busy`] while a call
    /// is outstanding. Neither changes the transcript.
    pub fn begin(&mut self, text: &str, user_id: Option<String>) -> Result<TriageRequest, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::Empty);
        }
        if self.state == SessionState::Awaiting {
            return Err(SubmitError::Busy);
        }
        self.turns.push(ConversationTurn::user(text.to_string()));
        self.state = SessionState::Awaiting;
        Ok(TriageRequest { symptoms: text.to_string(), user_id })
    }

    /// `Awaiting -> Idle`: record the outcome of the outstanding call.
    ///
    /// Returns `None` (and changes nothing) when no call was outstanding.
    pub fn complete(&mut self, outcome: Result<TriageResponse, TriageFailure>) -> Option<Notice> {
        if self.state != SessionState::Awaiting {
            return None;
        }
        self.state = SessionState::Idle;
        let notice = match outcome {
            Ok(response) => {
                self.turns
                    .push(ConversationTurn::assistant(response.analysis, Some(response.triage_level)));
                Notice::AnalysisComplete
            }
            Err(failure) => {
                self.turns.push(ConversationTurn::assistant(APOLOGY.to_string(), None));
                Notice::for_error(failure.kind)
            }
        };
        Some(notice)
    }

    /// Drop the whole transcript. Not undoable.
    pub fn reset(&mut self) -> Notice {
        self.turns.clear();
        self.state = SessionState::Idle;
        Notice::NewCheck
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CHECKER
// =============================================================================

/// A [`Session`] bound to the capabilities it needs to reach the proxy.
pub struct SymptomChecker {
    ctx: CheckerContext,
    session: Session,
}

impl SymptomChecker {
    #[must_use]
    pub fn new(ctx: CheckerContext) -> Self {
        Self { ctx, session: Session::new() }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &[ConversationTurn] {
        self.session.turns()
    }

    /// Submit one user turn and wait for its assistant turn.
    ///
    /// Upstream failures are not errors here: they become an apology turn and
    /// an error [`Notice`]. A call that outlives the context timeout counts as
    /// [`ErrorKind::UpstreamUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submission is refused before any call.
    pub async fn submit(&mut self, text: &str) -> Result<Notice, SubmitError> {
        let user_id = self.ctx.identity.current_user().map(|u| u.id);
        let request = self.session.begin(text, user_id)?;

        let outcome = match tokio::time::timeout(self.ctx.timeout, self.ctx.transport.classify(&request)).await {
            Ok(result) => result,
            Err(_) => Err(TriageFailure::new(
                ErrorKind::UpstreamUnavailable,
                format!("no response within {}s", self.ctx.timeout.as_secs()),
            )),
        };

        match &outcome {
            Ok(response) => debug!(triage_level = %response.triage_level, "checker: analysis received"),
            Err(failure) => warn!(kind = %failure.kind, error = %failure.message, "checker: analysis failed"),
        }

        Ok(self
            .session
            .complete(outcome)
            .unwrap_or(Notice::AnalysisFailed))
    }

    pub fn reset(&mut self) -> Notice {
        self.session.reset()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
