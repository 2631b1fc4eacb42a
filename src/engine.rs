//! Turn handling: one utterance in, replies and at most one host action out.
//!
//! Each call to [`Assistant::handle`] loads the session record, decides the
//! turn, saves the record and only then dispatches. A failed save skips the
//! dispatch. Order of checks:
//!
//! 1. exit phrase (bypasses everything else)
//! 2. pending confirmation
//! 3. wake gate
//! 4. intent routing

use crate::config::{AssistantConfig, RivaConfig};
use crate::confirm::{self, ConfirmOutcome};
use crate::dispatch::{self, ActionDispatcher, ActionRequest};
use crate::normalize::normalize;
use crate::replies::{self, ReplyPicker};
use crate::router::{self, RouteContext};
use crate::session::{SessionState, SessionStore};
use crate::wake::WakeGate;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Per-turn inputs supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext {
    pub now: DateTime<Utc>,
    /// Whether a wake phrase is needed to address the assistant.
    pub wake_required: bool,
}

impl TurnContext {
    pub fn at(now: DateTime<Utc>, wake_required: bool) -> Self {
        Self { now, wake_required }
    }
}

/// Everything a turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Lines to speak, in order. Empty when the assistant stays silent.
    pub replies: Vec<String>,
    /// Action carried out (or attempted) this turn.
    pub action: Option<ActionRequest>,
    /// Whether the host reported success. `None` when nothing was dispatched.
    pub dispatched: Option<bool>,
    /// The session should end.
    pub exit: bool,
    /// False when this turn's state change could not be persisted.
    pub saved: bool,
}

impl Turn {
    fn silent() -> Self {
        Self {
            replies: Vec::new(),
            action: None,
            dispatched: None,
            exit: false,
            saved: true,
        }
    }

    fn speaking(replies: Vec<String>) -> Self {
        Self {
            replies,
            ..Self::silent()
        }
    }

    pub fn is_silent(&self) -> bool {
        self.replies.is_empty()
    }
}

/// The dialogue engine.
pub struct Assistant<S, D, P> {
    identity: AssistantConfig,
    gate: WakeGate,
    store: S,
    dispatcher: D,
    picker: P,
}

impl<S, D, P> Assistant<S, D, P>
where
    S: SessionStore,
    D: ActionDispatcher,
    P: ReplyPicker,
{
    pub fn new(config: &RivaConfig, store: S, dispatcher: D, picker: P) -> Self {
        Self {
            identity: config.assistant.clone(),
            gate: WakeGate::from_config(config),
            store,
            dispatcher,
            picker,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn identity(&self) -> &AssistantConfig {
        &self.identity
    }

    /// Handle one raw utterance.
    pub fn handle(&mut self, utterance: &str, ctx: &TurnContext) -> Turn {
        let text = normalize(utterance);

        if self.is_exit(&text) {
            return self.exit();
        }
        if text.is_empty() {
            return Turn::silent();
        }

        let mut state = self.store.load();

        if state.pending_action.is_some() {
            return self.answer_confirmation(state, &text);
        }

        let decision = self.gate.evaluate(ctx.now, &text, ctx.wake_required, &mut state);
        if !decision.addressed {
            return Turn::silent();
        }

        state.last_command.clone_from(&decision.text);

        if decision.text.is_empty() {
            // Only the wake phrase or the name was said.
            let saved = self.persist(&state);
            return Turn {
                saved,
                ..Turn::speaking(vec![replies::introduction(&self.identity)])
            };
        }

        let routed = {
            let mut route_ctx = RouteContext {
                now: ctx.now,
                required: ctx.wake_required,
                assistant: &self.identity,
                picker: &mut self.picker,
            };
            router::route(&decision.text, &mut route_ctx)
        };

        if let Some(request) = routed.arm.clone() {
            confirm::arm(&mut state, request);
        }
        if routed.sleep {
            state.sleep();
            info!("going to sleep");
        }
        let saved = self.persist(&state);

        let mut turn = Turn {
            saved,
            ..Turn::speaking(routed.replies)
        };
        if let Some(request) = routed.action {
            self.carry_out(&mut turn, request);
        }
        turn
    }

    /// Dispatch `request` unless this turn's save failed.
    fn carry_out(&self, turn: &mut Turn, request: ActionRequest) {
        if !turn.saved {
            warn!(action = %request.action, "skipping host action, session state not saved");
            turn.replies.push(replies::DISPATCH_FAILED.to_owned());
            return;
        }
        let outcome = dispatch::dispatch(&self.dispatcher, &request);
        if !outcome.succeeded {
            warn!(action = %request.action, "host action failed");
        }
        turn.replies.push(replies::action_result(&request, &outcome));
        turn.dispatched = Some(outcome.succeeded);
        turn.action = Some(request);
    }

    fn is_exit(&self, text: &str) -> bool {
        let candidate = self
            .gate
            .is_wake_phrase(text)
            .unwrap_or_else(|| self.gate.strip_name(text));
        router::is_exit_phrase(&candidate)
    }

    fn exit(&self) -> Turn {
        let mut state = self.store.load();
        state.clear_pending();
        state.sleep();
        let saved = self.persist(&state);
        info!("exit phrase heard, ending session");
        Turn {
            exit: true,
            saved,
            ..Turn::speaking(vec![replies::GOODBYE.to_owned()])
        }
    }

    fn answer_confirmation(&self, mut state: SessionState, text: &str) -> Turn {
        match confirm::resolve(&mut state, text) {
            ConfirmOutcome::Confirmed(request) => {
                let saved = self.persist(&state);
                let mut turn = Turn {
                    saved,
                    ..Turn::speaking(vec![replies::GENERIC_CONFIRMED.to_owned()])
                };
                if confirm::is_dispatchable(&request) {
                    self.carry_out(&mut turn, request);
                } else {
                    warn!(action = %request.action, "confirmed an action this build cannot perform");
                }
                turn
            }
            ConfirmOutcome::Cancelled => {
                let saved = self.persist(&state);
                Turn {
                    saved,
                    ..Turn::speaking(vec![replies::CANCELLED.to_owned()])
                }
            }
            ConfirmOutcome::Unclear => {
                debug!("confirmation answer unclear, asking again");
                Turn::speaking(vec![replies::CONFIRM_OR_CANCEL.to_owned()])
            }
        }
    }

    fn persist(&self, state: &SessionState) -> bool {
        match self.store.save(state) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "session state not saved, this turn's changes are lost");
                false
            }
        }
    }
}
