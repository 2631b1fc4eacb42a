//! Single-slot confirmation dialogue.
//!
//! While an action is pending, the next utterance is read only as an answer:
//! yes, no, or neither. Nothing else is routed until the slot is cleared.

use crate::dispatch::{ActionKind, ActionRequest};
use crate::normalize::contains_any;
use crate::session::SessionState;
use tracing::info;

const YES: &[&str] = &[
    "yes", "yeah", "yep", "yup", "ok", "okay", "sure", "confirm", "do it", "go ahead",
];

const NO: &[&str] = &[
    "no",
    "nope",
    "cancel",
    "stop",
    "don't",
    "do not",
    "never mind",
];

/// How a pending confirmation was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The user agreed; the stored request should be carried out.
    Confirmed(ActionRequest),
    /// The user declined.
    Cancelled,
    /// Neither yes nor no. The request stays pending.
    Unclear,
}

/// Whether `text` contains an affirmation.
pub fn is_yes(text: &str) -> bool {
    contains_any(text, YES)
}

/// Whether `text` contains a negation.
pub fn is_no(text: &str) -> bool {
    contains_any(text, NO)
}

/// Arm a confirmation for `request`, replacing any previous one.
pub fn arm(state: &mut SessionState, request: ActionRequest) {
    info!(action = %request.action, payload = ?request.payload, "awaiting confirmation");
    state.arm(request.action, request.payload);
}

/// Answer the pending confirmation with `text`.
///
/// Affirmation wins when an answer contains both. Returns
/// [`ConfirmOutcome::Unclear`] without touching `state` when nothing is
/// pending.
pub fn resolve(state: &mut SessionState, text: &str) -> ConfirmOutcome {
    let Some(request) = state.pending() else {
        return ConfirmOutcome::Unclear;
    };

    if is_yes(text) {
        state.clear_pending();
        info!(action = %request.action, "confirmed");
        ConfirmOutcome::Confirmed(request)
    } else if is_no(text) {
        state.clear_pending();
        info!(action = %request.action, "cancelled");
        ConfirmOutcome::Cancelled
    } else {
        ConfirmOutcome::Unclear
    }
}

/// Whether a confirmed request should reach the host at all.
pub fn is_dispatchable(request: &ActionRequest) -> bool {
    request.action != ActionKind::Unknown
}
