//! Shared symptom-triage model for the proxy service and its clients.
//!
//! This crate owns everything both sides of the `analyze-symptoms` exchange
//! must agree on: the wire shapes, the three-level triage scale and the
//! keyword classifier that produces it, the error taxonomy, and the
//! client-side conversation state machine that drives one request per user
//! turn.
//!
//! The proxy (root crate) depends on it for [`classify_text`] and the wire
//! types; the terminal checker depends on it for [`SymptomChecker`].

pub mod context;
pub mod error;
pub mod level;
pub mod markup;
pub mod session;
pub mod wire;

pub use context::{CheckerContext, Identity, LocalIdentity, TriageTransport, User};
pub use error::{ErrorKind, SubmitError, TriageFailure};
pub use level::{TriageLevel, classify_text};
pub use session::{ConversationTurn, Notice, Role, Session, SessionState, SymptomChecker};
pub use wire::{ErrorBody, TriageRequest, TriageResponse};
