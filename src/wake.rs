//! Wake gate: decides whether an utterance is addressed to the assistant.
//!
//! A wake phrase is a greeting token immediately followed by the assistant's
//! name ("hi riva", "hey reva"). When the wake phrase is required (voice
//! mode), it opens an awake window; utterances inside the window are routed
//! without repeating it, and everything else is dropped silently. Text mode
//! is never gated.
//!
//! The gate is a pure timestamp comparison against a caller-supplied `now`;
//! there is no background timer.

use crate::config::RivaConfig;
use crate::normalize::{contains_phrase, strip_phrase};
use crate::session::SessionState;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

/// Longest awake window, used when no window is configured.
const UNBOUNDED_WINDOW_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// Outcome of the wake gate for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeDecision {
    /// Whether the utterance should be routed at all.
    pub addressed: bool,
    /// Whether a full wake phrase was used.
    pub woke: bool,
    /// Text to route, with wake phrase or name stripped.
    pub text: String,
}

impl WakeDecision {
    fn ignored() -> Self {
        Self {
            addressed: false,
            woke: false,
            text: String::new(),
        }
    }
}

/// Wake phrase matcher and awake-window policy.
#[derive(Debug, Clone)]
pub struct WakeGate {
    /// Lowercase name tokens, longest first.
    names: Vec<String>,
    greetings: Vec<String>,
    window: Duration,
}

impl WakeGate {
    pub fn new(names: Vec<String>, greetings: Vec<String>, window_secs: Option<u64>) -> Self {
        let secs = window_secs
            .map(|s| i64::try_from(s).unwrap_or(i64::MAX).min(UNBOUNDED_WINDOW_SECS))
            .unwrap_or(UNBOUNDED_WINDOW_SECS);
        Self {
            names,
            greetings: greetings.into_iter().map(|g| g.to_lowercase()).collect(),
            window: Duration::seconds(secs),
        }
    }

    pub fn from_config(config: &RivaConfig) -> Self {
        Self::new(
            config.assistant.name_tokens(),
            config.wake.greetings.clone(),
            config.wake.window_secs,
        )
    }

    /// Length of the awake window opened by a wake phrase.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// If `text` starts with a greeting followed by the name, the rest of it.
    pub fn is_wake_phrase(&self, text: &str) -> Option<String> {
        for greeting in &self.greetings {
            let Some(after_greeting) = text.strip_prefix(greeting.as_str()) else {
                continue;
            };
            let Some(after_greeting) = after_greeting.strip_prefix(' ') else {
                continue;
            };
            for name in &self.names {
                if let Some(rest) = after_greeting.strip_prefix(name.as_str())
                    && (rest.is_empty() || rest.starts_with(' '))
                {
                    return Some(rest.trim().to_owned());
                }
            }
        }
        None
    }

    /// Whether the bare name appears anywhere in `text`.
    pub fn mentions_name(&self, text: &str) -> bool {
        self.names.iter().any(|n| contains_phrase(text, n))
    }

    /// Remove every occurrence of the name from `text`.
    pub fn strip_name(&self, text: &str) -> String {
        self.names
            .iter()
            .fold(text.to_owned(), |acc, name| strip_phrase(&acc, name))
    }

    /// Decide whether `text` is addressed to the assistant at `now`.
    ///
    /// Only a wake phrase in required mode mutates `state` (it extends the
    /// awake window). An unaddressed utterance leaves `state` untouched.
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        text: &str,
        required: bool,
        state: &mut SessionState,
    ) -> WakeDecision {
        if let Some(rest) = self.is_wake_phrase(text) {
            if required {
                let until = now.checked_add_signed(self.window).unwrap_or(now);
                state.wake_until(until);
                info!(awake_until = %state.awake_until, "wake phrase heard, awake");
            }
            return WakeDecision {
                addressed: true,
                woke: true,
                text: rest,
            };
        }

        if !required {
            let text = if self.mentions_name(text) {
                self.strip_name(text)
            } else {
                text.to_owned()
            };
            return WakeDecision {
                addressed: true,
                woke: false,
                text,
            };
        }

        if state.is_awake(now) {
            return WakeDecision {
                addressed: true,
                woke: false,
                text: self.strip_name(text),
            };
        }

        debug!("asleep and no wake phrase, staying silent");
        WakeDecision::ignored()
    }
}
