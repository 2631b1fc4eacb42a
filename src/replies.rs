//! Canned reply lines and the seedable picker that chooses among them.
//!
//! Randomness only ever affects which line of a set is spoken, never which
//! rule handles an utterance. Tests seed the picker and assert membership in
//! the set rather than exact text.

use crate::config::AssistantConfig;
use crate::dispatch::{ActionKind, ActionRequest, DispatchOutcome};
use crate::targets::{AppTarget, SiteTarget};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const GREETINGS: &[&str] = &[
    "Hello! How can I help?",
    "Hi there! What do you need?",
    "Hey! Ready when you are.",
    "Hello again. What's next?",
    "Hi! Good to hear from you.",
];

pub const CONFUSED: &[&str] = &[
    "Sorry, I didn't catch that.",
    "Hmm, I'm not sure what you mean.",
    "I don't know how to do that yet.",
    "Could you say that another way?",
    "That one is beyond me for now. Try saying help.",
];

pub const WHO_AM_I: &[&str] = &[
    "You are my favorite human. Probably.",
    "You are the boss of this PC.",
    "You are a legend in progress.",
    "You are the one who keeps giving me tasks. And I respect that.",
    "You are the reason my code exists.",
];

pub const CONFIRM_OR_CANCEL: &str = "Please say yes to confirm, or say cancel.";
pub const CANCELLED: &str = "Okay, cancelled.";
pub const GENERIC_CONFIRMED: &str = "Confirmed.";
pub const GOODBYE: &str = "Okay, I am going offline now.";
pub const DISPATCH_FAILED: &str = "Sorry, I couldn't do that.";
pub const CANNOT_CLOSE: &str = "I can't close that yet.";
pub const BATTERY_UNAVAILABLE: &str = "I couldn't read the battery level.";

/// Introduction spoken on a bare wake phrase and for identity questions.
pub fn introduction(assistant: &AssistantConfig) -> String {
    format!(
        "Hi! I'm {}, your AI assistant created by {}. How can I help you today?",
        assistant.name, assistant.creator
    )
}

/// Line spoken after the host carried out (or failed) `request`.
pub fn action_result(request: &ActionRequest, outcome: &DispatchOutcome) -> String {
    if request.action == ActionKind::CheckBattery {
        return match outcome.detail.as_deref() {
            Some(percent) if outcome.succeeded => format!("Battery is {percent} percent."),
            _ => BATTERY_UNAVAILABLE.to_owned(),
        };
    }
    if !outcome.succeeded {
        return DISPATCH_FAILED.to_owned();
    }

    let payload = request.payload.as_deref().unwrap_or_default();
    match request.action {
        ActionKind::Shutdown => "Shutting down now.".to_owned(),
        ActionKind::OpenEditor => "Opening VS Code. Programmer mode on \u{1F913}".to_owned(),
        ActionKind::OpenFolder => "Opening the current folder.".to_owned(),
        ActionKind::OpenBrowser => match SiteTarget::from_url(payload) {
            Some(site) => format!("Opening {}.", site.display_name()),
            None => "Opening the browser.".to_owned(),
        },
        ActionKind::CloseApp => match AppTarget::from_process(payload) {
            Some(app) => format!("Closing {}.", app.display_name()),
            None => format!("Closing {payload}."),
        },
        ActionKind::CloseTab => format!("Closed the {payload} tab."),
        ActionKind::CheckBattery | ActionKind::Unknown => GENERIC_CONFIRMED.to_owned(),
    }
}

/// Chooses one line out of a reply set.
pub trait ReplyPicker {
    /// Pick one of `lines`. Returns an empty string for an empty set.
    fn pick<'a>(&mut self, lines: &[&'a str]) -> &'a str;
}

/// [`ReplyPicker`] backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picker.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplyPicker for RandomPicker {
    fn pick<'a>(&mut self, lines: &[&'a str]) -> &'a str {
        lines.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
