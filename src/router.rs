//! Ordered intent table.
//!
//! [`ROUTES`] is evaluated top to bottom on normalized, wake-stripped text
//! and the first matching rule decides the turn. Narrow phrases sit above the
//! broad keyword rules that only ask for confirmation, so "open vs code" acts
//! directly while "open code editor thing" asks first.
//!
//! Routing is pure: rules return a [`Routed`] describing replies, a direct
//! action, or a confirmation to arm. The engine applies and dispatches it.

use crate::config::AssistantConfig;
use crate::dispatch::{ActionKind, ActionRequest};
use crate::mood::Mood;
use crate::normalize::{contains_any, contains_phrase, contains_word, strip_phrase};
use crate::replies::{self, ReplyPicker};
use crate::targets::{AppTarget, SiteTarget};
use chrono::{DateTime, Local, Utc};
use tracing::debug;

/// Inputs a rule may consult besides the text itself.
pub struct RouteContext<'a> {
    pub now: DateTime<Utc>,
    /// Whether the wake phrase is currently required.
    pub required: bool,
    pub assistant: &'a AssistantConfig,
    pub picker: &'a mut dyn ReplyPicker,
}

/// What a rule decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routed {
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Lines spoken before any action runs.
    pub replies: Vec<String>,
    /// Action to carry out now.
    pub action: Option<ActionRequest>,
    /// Action to hold until the user confirms.
    pub arm: Option<ActionRequest>,
    /// Close the awake window.
    pub sleep: bool,
}

impl Routed {
    fn say(line: impl Into<String>) -> Self {
        Self {
            replies: vec![line.into()],
            ..Self::default()
        }
    }

    fn act(request: ActionRequest) -> Self {
        Self {
            action: Some(request),
            ..Self::default()
        }
    }

    fn ask(question: impl Into<String>, request: ActionRequest) -> Self {
        Self {
            replies: vec![question.into()],
            arm: Some(request),
            ..Self::default()
        }
    }
}

/// A named predicate and handler pair.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub handle: fn(&str, &mut RouteContext<'_>) -> Routed,
}

/// Intent rules in precedence order. The last rule always matches.
pub static ROUTES: &[Rule] = &[
    Rule {
        name: "greeting",
        matches: is_greeting,
        handle: greet,
    },
    Rule {
        name: "help",
        matches: is_help,
        handle: help,
    },
    Rule {
        name: "identity",
        matches: is_identity,
        handle: introduce,
    },
    Rule {
        name: "relationship",
        matches: is_relationship,
        handle: relationship,
    },
    Rule {
        name: "open_exact",
        matches: is_exact_open,
        handle: open_exact,
    },
    Rule {
        name: "open_fuzzy",
        matches: is_fuzzy_open,
        handle: open_fuzzy,
    },
    Rule {
        name: "open_folder",
        matches: is_open_folder,
        handle: open_folder,
    },
    Rule {
        name: "open_folder_fuzzy",
        matches: is_fuzzy_open_folder,
        handle: open_folder_fuzzy,
    },
    Rule {
        name: "battery",
        matches: is_battery,
        handle: battery,
    },
    Rule {
        name: "time",
        matches: is_time,
        handle: time,
    },
    Rule {
        name: "shutdown",
        matches: is_shutdown,
        handle: shutdown,
    },
    Rule {
        name: "close",
        matches: is_close,
        handle: close,
    },
    Rule {
        name: "sleep",
        matches: is_sleep,
        handle: sleep,
    },
    Rule {
        name: "fallback",
        matches: always,
        handle: fallback,
    },
];

/// Route `text` through [`ROUTES`].
pub fn route(text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    for rule in ROUTES {
        if (rule.matches)(text) {
            debug!(rule = rule.name, text, "routed");
            let mut routed = (rule.handle)(text, ctx);
            routed.rule = rule.name;
            return routed;
        }
    }
    Routed::default()
}

/// Name of the first rule matching `text`.
pub fn matching_rule(text: &str) -> Option<&'static str> {
    ROUTES.iter().find(|r| (r.matches)(text)).map(|r| r.name)
}

// ── Exit ────────────────────────────────────────────────────────────────

/// Phrases that end the session wherever they appear on word boundaries.
const EXIT_PHRASES: &[&str] = &[
    "exit",
    "quit",
    "now leave",
    "goodbye",
    "good bye",
    "bye",
    "go offline",
];

/// Only ends the session when said on its own ("leave the folder open").
const EXIT_WORDS_ALONE: &[&str] = &["leave"];

/// Whether `text` (name already stripped) ends the session.
pub fn is_exit_phrase(text: &str) -> bool {
    contains_any(text, EXIT_PHRASES) || EXIT_WORDS_ALONE.contains(&text)
}

// ── Conversation ────────────────────────────────────────────────────────

fn is_greeting(text: &str) -> bool {
    contains_any(
        text,
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
    )
}

fn greet(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    Routed::say(ctx.picker.pick(replies::GREETINGS))
}

fn is_help(text: &str) -> bool {
    contains_any(
        text,
        &["help", "what can you do", "commands", "features", "capabilities"],
    )
}

fn help(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    let mut lines: Vec<String> = [
        "Here is what I can do right now.",
        "Open apps and sites: say open vs code, open youtube, or open github.",
        "Open the current folder: say open folder.",
        "Close things: say close chrome, or close the youtube tab.",
        "Check battery or time: say battery, or what time is it.",
        "Shut down the PC: say shutdown, and I will ask you to confirm.",
        "Go offline: say exit.",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();
    if ctx.required {
        lines.push(format!(
            "Wake me first by saying hi {}.",
            ctx.assistant.name
        ));
    } else {
        lines.push("Wake word is optional here.".to_owned());
    }
    Routed {
        replies: lines,
        ..Routed::default()
    }
}

fn is_identity(text: &str) -> bool {
    contains_any(
        text,
        &["who are you", "what are you", "introduce yourself", "your name"],
    )
}

fn introduce(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    Routed::say(replies::introduction(ctx.assistant))
}

fn is_relationship(text: &str) -> bool {
    contains_any(text, &["who am i", "do you know me"])
}

fn relationship(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    Routed::say(ctx.picker.pick(replies::WHO_AM_I))
}

// ── Open ────────────────────────────────────────────────────────────────

/// Editor phrases trusted without confirmation, mis-hearings included.
const EDITOR_PHRASES: &[&str] = &[
    "open vscode",
    "open vs code",
    "open visual studio code",
    "open this code",
    "open base code",
    "open best code",
];

fn exact_open_target(text: &str) -> Option<ActionRequest> {
    if contains_any(text, EDITOR_PHRASES) {
        return Some(ActionRequest::new(ActionKind::OpenEditor));
    }
    if contains_phrase(text, "open browser") || contains_phrase(text, "open the browser") {
        return Some(ActionRequest::with_payload(
            ActionKind::OpenBrowser,
            SiteTarget::Google.url(),
        ));
    }
    SiteTarget::ALL
        .into_iter()
        .find(|site| {
            site.aliases()
                .iter()
                .any(|alias| contains_phrase(text, &format!("open {alias}")))
        })
        .map(|site| ActionRequest::with_payload(ActionKind::OpenBrowser, site.url()))
}

fn is_exact_open(text: &str) -> bool {
    exact_open_target(text).is_some()
}

fn open_exact(text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    match exact_open_target(text) {
        Some(request) => Routed::act(request),
        None => Routed::default(),
    }
}

/// The editor or site an "open" request most likely meant.
fn fuzzy_open_target(text: &str) -> Option<(String, ActionRequest)> {
    if !contains_word(text, "open") {
        return None;
    }
    if contains_word(text, "code") {
        return Some((
            AppTarget::VsCode.display_name().to_owned(),
            ActionRequest::new(ActionKind::OpenEditor),
        ));
    }
    SiteTarget::ALL
        .into_iter()
        .find(|site| site.hints().iter().any(|hint| contains_word(text, hint)))
        .map(|site| {
            (
                site.display_name().to_owned(),
                ActionRequest::with_payload(ActionKind::OpenBrowser, site.url()),
            )
        })
}

fn is_fuzzy_open(text: &str) -> bool {
    fuzzy_open_target(text).is_some()
}

fn open_fuzzy(text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    match fuzzy_open_target(text) {
        Some((name, request)) => Routed::ask(format!("Did you mean 'open {name}'?"), request),
        None => Routed::default(),
    }
}

fn is_open_folder(text: &str) -> bool {
    contains_any(
        text,
        &["open folder", "open the folder", "open current folder", "open the current folder"],
    )
}

fn open_folder(_text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    Routed::act(ActionRequest::new(ActionKind::OpenFolder))
}

fn is_fuzzy_open_folder(text: &str) -> bool {
    contains_word(text, "open") && contains_word(text, "folder")
}

fn open_folder_fuzzy(_text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    Routed::ask(
        "Did you mean 'open folder'?",
        ActionRequest::new(ActionKind::OpenFolder),
    )
}

// ── Utilities ───────────────────────────────────────────────────────────

fn is_battery(text: &str) -> bool {
    contains_word(text, "battery")
}

fn battery(_text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    Routed::act(ActionRequest::new(ActionKind::CheckBattery))
}

fn is_time(text: &str) -> bool {
    (contains_word(text, "time") && contains_any(text, &["what", "tell", "current"]))
        || contains_any(text, &["what's the time", "whats the time"])
}

fn time(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    let local = ctx.now.with_timezone(&Local);
    Routed::say(format!("It's {}.", local.format("%-I:%M %p")))
}

fn is_shutdown(text: &str) -> bool {
    contains_any(
        text,
        &[
            "shutdown",
            "shut down",
            "power off",
            "turn off the computer",
            "turn off the pc",
            "turn off my computer",
            "turn off my pc",
        ],
    )
}

fn shutdown(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    let mut replies = Vec::new();
    if let Some(preamble) = Mood::at(ctx.now).shutdown_preamble() {
        replies.push(preamble.to_owned());
    }
    replies.push(format!(
        "Do you want me to shut down the PC? {}",
        replies::CONFIRM_OR_CANCEL
    ));
    Routed {
        replies,
        arm: Some(ActionRequest::new(ActionKind::Shutdown)),
        ..Routed::default()
    }
}

// ── Close ───────────────────────────────────────────────────────────────

const CLOSE_FILLERS: &[&str] = &[
    "the",
    "my",
    "app",
    "application",
    "tab",
    "window",
    "please",
];

fn is_close(text: &str) -> bool {
    contains_word(text, "close")
}

/// Target named after the first "close", fillers removed.
fn close_target(text: &str) -> String {
    let after: Vec<&str> = text
        .split_whitespace()
        .skip_while(|token| *token != "close")
        .skip(1)
        .collect();
    CLOSE_FILLERS
        .iter()
        .fold(after.join(" "), |acc, filler| strip_phrase(&acc, filler))
}

fn close(text: &str, _ctx: &mut RouteContext<'_>) -> Routed {
    let target = close_target(text);
    if let Some(app) = AppTarget::resolve(&target) {
        return Routed::act(ActionRequest::with_payload(
            ActionKind::CloseApp,
            app.process_name(),
        ));
    }
    if let Some(site) = SiteTarget::resolve(&target) {
        return Routed::act(ActionRequest::with_payload(
            ActionKind::CloseTab,
            site.display_name(),
        ));
    }
    debug!(close_target = %target, "nothing known to close");
    Routed::say(replies::CANNOT_CLOSE)
}

// ── Sleep and fallback ──────────────────────────────────────────────────

fn is_sleep(text: &str) -> bool {
    text == "sleep" || contains_any(text, &["go to sleep", "stop listening"])
}

fn sleep(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    let line = if ctx.required {
        format!("Okay, going to sleep. Say hi {} to wake me.", ctx.assistant.name)
    } else {
        "Okay. I'm still here if you type something.".to_owned()
    };
    Routed {
        replies: vec![line],
        sleep: true,
        ..Routed::default()
    }
}

fn always(_text: &str) -> bool {
    true
}

fn fallback(_text: &str, ctx: &mut RouteContext<'_>) -> Routed {
    Routed::say(ctx.picker.pick(replies::CONFUSED))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::replies::RandomPicker;

    fn route_text(text: &str, required: bool) -> Routed {
        let assistant = AssistantConfig::default();
        let mut picker = RandomPicker::seeded(3);
        let mut ctx = RouteContext {
            now: Utc::now(),
            required,
            assistant: &assistant,
            picker: &mut picker,
        };
        route(text, &mut ctx)
    }

    #[test]
    fn last_rule_is_catch_all() {
        let last = ROUTES.last().expect("non-empty table");
        assert_eq!(last.name, "fallback");
        assert!((last.matches)("anything at all"));
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = ROUTES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn greeting_is_word_bounded() {
        assert_eq!(matching_rule("hi"), Some("greeting"));
        assert_eq!(matching_rule("good evening"), Some("greeting"));
        assert_ne!(matching_rule("open this code"), Some("greeting"));
        assert_ne!(matching_rule("shutdown while i think"), Some("greeting"));
    }

    #[test]
    fn greeting_outranks_later_rules() {
        assert_eq!(matching_rule("hey open folder"), Some("greeting"));
    }

    #[test]
    fn open_this_code_is_exact() {
        let routed = route_text("open this code", true);
        assert_eq!(routed.rule, "open_exact");
        assert_eq!(routed.action, Some(ActionRequest::new(ActionKind::OpenEditor)));
        assert!(routed.arm.is_none());
    }

    #[test]
    fn open_code_editor_thing_asks_first() {
        let routed = route_text("open code editor thing", true);
        assert_eq!(routed.rule, "open_fuzzy");
        assert!(routed.action.is_none());
        assert_eq!(routed.arm, Some(ActionRequest::new(ActionKind::OpenEditor)));
        assert_eq!(routed.replies, vec!["Did you mean 'open VS Code'?".to_owned()]);
    }

    #[test]
    fn exact_site_phrases_open_directly() {
        for (text, site) in [
            ("open youtube", SiteTarget::YouTube),
            ("please open you tube", SiteTarget::YouTube),
            ("open git hub", SiteTarget::GitHub),
            ("open repo", SiteTarget::GitHub),
            ("open repository", SiteTarget::GitHub),
            ("open chat gpt", SiteTarget::ChatGpt),
            ("open gmail", SiteTarget::Gmail),
            ("open google", SiteTarget::Google),
        ] {
            let routed = route_text(text, false);
            assert_eq!(
                routed.action,
                Some(ActionRequest::with_payload(ActionKind::OpenBrowser, site.url())),
                "{text}"
            );
        }
    }

    #[test]
    fn site_keyword_without_phrase_asks_first() {
        let routed = route_text("can you open the tube thing", false);
        assert_eq!(routed.rule, "open_fuzzy");
        assert_eq!(
            routed.arm,
            Some(ActionRequest::with_payload(
                ActionKind::OpenBrowser,
                SiteTarget::YouTube.url()
            ))
        );
        assert_eq!(routed.replies, vec!["Did you mean 'open YouTube'?".to_owned()]);
    }

    #[test]
    fn open_browser_is_direct() {
        let routed = route_text("open browser", false);
        assert_eq!(routed.rule, "open_exact");
        assert_eq!(routed.action.map(|a| a.action), Some(ActionKind::OpenBrowser));
    }

    #[test]
    fn folder_rules() {
        let exact = route_text("open folder", false);
        assert_eq!(exact.action, Some(ActionRequest::new(ActionKind::OpenFolder)));

        let fuzzy = route_text("open my project folder", false);
        assert_eq!(fuzzy.rule, "open_folder_fuzzy");
        assert_eq!(fuzzy.arm, Some(ActionRequest::new(ActionKind::OpenFolder)));
    }

    #[test]
    fn code_outranks_folder_when_both_present() {
        assert_eq!(matching_rule("open the code folder"), Some("open_fuzzy"));
    }

    #[test]
    fn battery_is_an_action() {
        let routed = route_text("how much battery is left", false);
        assert_eq!(routed.action, Some(ActionRequest::new(ActionKind::CheckBattery)));
        assert!(routed.replies.is_empty());
    }

    #[test]
    fn time_phrases() {
        assert_eq!(matching_rule("what time is it"), Some("time"));
        assert_eq!(matching_rule("tell me the time"), Some("time"));
        assert_eq!(matching_rule("what's the time"), Some("time"));
        assert_eq!(matching_rule("time"), Some("fallback"));
        let routed = route_text("what time is it", false);
        assert!(routed.replies[0].starts_with("It's "));
    }

    #[test]
    fn shutdown_arms_after_optional_mood_line() {
        let routed = route_text("shut down the computer", true);
        assert_eq!(routed.rule, "shutdown");
        assert_eq!(routed.arm, Some(ActionRequest::new(ActionKind::Shutdown)));
        assert!(routed.action.is_none());
        let last = routed.replies.last().expect("question");
        assert!(last.ends_with(replies::CONFIRM_OR_CANCEL));
        assert!(routed.replies.len() <= 2);
    }

    #[test]
    fn close_resolves_apps_and_sites() {
        let app = route_text("close the vs code window", false);
        assert_eq!(
            app.action,
            Some(ActionRequest::with_payload(ActionKind::CloseApp, "code"))
        );

        let tab = route_text("close you tube tab", false);
        assert_eq!(
            tab.action,
            Some(ActionRequest::with_payload(ActionKind::CloseTab, "YouTube"))
        );

        let chrome = route_text("please close chrome", false);
        assert_eq!(
            chrome.action,
            Some(ActionRequest::with_payload(ActionKind::CloseApp, "chrome"))
        );
    }

    #[test]
    fn close_unknown_target_is_refused() {
        let routed = route_text("close the fridge", false);
        assert_eq!(routed.rule, "close");
        assert!(routed.action.is_none());
        assert_eq!(routed.replies, vec![replies::CANNOT_CLOSE.to_owned()]);

        let bare = route_text("close", false);
        assert_eq!(bare.replies, vec![replies::CANNOT_CLOSE.to_owned()]);
    }

    #[test]
    fn help_mentions_wake_mode() {
        let required = route_text("help", true);
        assert!(required.replies.last().unwrap().contains("hi Riva"));
        let optional = route_text("what can you do", false);
        assert_eq!(optional.replies.last().unwrap(), "Wake word is optional here.");
        assert_eq!(required.replies.len(), optional.replies.len());
    }

    #[test]
    fn identity_and_relationship() {
        let intro = route_text("who are you", false);
        assert_eq!(
            intro.replies,
            vec![replies::introduction(&AssistantConfig::default())]
        );
        let me = route_text("do you know me", false);
        assert!(replies::WHO_AM_I.contains(&me.replies[0].as_str()));
    }

    #[test]
    fn sleep_closes_window() {
        let routed = route_text("go to sleep", true);
        assert!(routed.sleep);
        assert!(routed.replies[0].contains("hi Riva"));
        assert_eq!(matching_rule("sleep"), Some("sleep"));
    }

    #[test]
    fn fallback_is_confused() {
        let routed = route_text("make me a sandwich", false);
        assert_eq!(routed.rule, "fallback");
        assert!(replies::CONFUSED.contains(&routed.replies[0].as_str()));
    }

    #[test]
    fn routing_is_deterministic() {
        for text in ["open code editor thing", "close chrome", "battery", "xyz"] {
            let first = matching_rule(text);
            for _ in 0..5 {
                assert_eq!(matching_rule(text), first);
            }
        }
    }

    #[test]
    fn exit_phrases_match_inside_longer_utterances() {
        assert!(is_exit_phrase("now leave"));
        assert!(is_exit_phrase("exit"));
        assert!(is_exit_phrase("goodbye"));
        assert!(is_exit_phrase("please exit"));
        assert!(is_exit_phrase("exit please"));
        assert!(is_exit_phrase("okay now leave"));
        assert!(is_exit_phrase("go offline now"));
        assert!(is_exit_phrase("ok bye bye"));
        assert!(is_exit_phrase("leave"));
        assert!(!is_exit_phrase("leave the folder open"));
        assert!(!is_exit_phrase("exited"));
        assert!(!is_exit_phrase("byebye"));
        assert!(!is_exit_phrase(""));
    }
}
