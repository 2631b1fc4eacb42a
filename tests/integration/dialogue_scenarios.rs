//! End-to-end dialogue scenarios through `Assistant::handle`.

use crate::helpers::{assistant, stored, text, voice};
use riva::replies::{self, CONFUSED, GREETINGS};
use riva::targets::SiteTarget;
use riva::{ActionKind, ActionRequest};

#[test]
fn hi_riva_introduces_and_wakes() {
    let mut a = assistant();
    let turn = a.handle("hi riva", &voice(1_000));
    assert_eq!(turn.replies.len(), 1);
    assert_eq!(turn.replies[0], replies::introduction(a.identity()));
    assert!(stored(a.store()).awake_until > crate::helpers::at(1_000));
}

#[test]
fn shutdown_then_yes_powers_off() {
    let mut a = assistant();
    a.handle("hey riva", &voice(0));

    let ask = a.handle("shutdown", &voice(1));
    assert!(ask.action.is_none());
    assert_eq!(stored(a.store()).pending_action, Some(ActionKind::Shutdown));

    let yes = a.handle("yes", &voice(2));
    assert_eq!(yes.action, Some(ActionRequest::new(ActionKind::Shutdown)));
    assert_eq!(yes.dispatched, Some(true));
    assert_eq!(a.dispatcher().calls(), vec!["shutdown"]);
    assert!(stored(a.store()).pending_action.is_none());
}

#[test]
fn open_this_code_acts_without_confirmation() {
    let mut a = assistant();
    a.handle("hi riva", &voice(0));
    let turn = a.handle("open this code", &voice(1));
    assert_eq!(turn.action, Some(ActionRequest::new(ActionKind::OpenEditor)));
    assert!(stored(a.store()).pending_action.is_none());
}

#[test]
fn open_code_editor_thing_arms_editor() {
    let mut a = assistant();
    a.handle("hi riva", &voice(0));
    let turn = a.handle("open code editor thing", &voice(1));
    assert!(turn.action.is_none());
    assert!(a.dispatcher().calls().is_empty());
    assert_eq!(stored(a.store()).pending_action, Some(ActionKind::OpenEditor));

    a.handle("yeah", &voice(2));
    assert_eq!(a.dispatcher().calls(), vec!["open_editor"]);
}

#[test]
fn now_leave_ends_session_from_any_state() {
    // Asleep, voice mode.
    let mut asleep = assistant();
    let turn = asleep.handle("now leave", &voice(0));
    assert!(turn.exit);
    assert_eq!(turn.replies, vec![replies::GOODBYE.to_owned()]);

    // Pending confirmation.
    let mut pending = assistant();
    pending.handle("shutdown", &text(0));
    let turn = pending.handle("now leave", &text(1));
    assert!(turn.exit);
    assert!(pending.dispatcher().calls().is_empty());
    assert!(stored(pending.store()).pending_action.is_none());
}

#[test]
fn fuzzy_site_confirmation_opens_payload_url() {
    let mut a = assistant();
    a.handle("open the tube please", &text(0));
    let pending = stored(a.store());
    assert_eq!(pending.pending_action, Some(ActionKind::OpenBrowser));
    assert_eq!(
        pending.pending_payload.as_deref(),
        Some(SiteTarget::YouTube.url())
    );

    let turn = a.handle("go ahead", &text(1));
    assert_eq!(
        a.dispatcher().calls(),
        vec![format!("open_url:{}", SiteTarget::YouTube.url())]
    );
    assert_eq!(turn.replies.last().unwrap(), "Opening YouTube.");
}

#[test]
fn close_commands_reach_the_host() {
    let mut a = assistant();
    a.handle("close the chrome window", &text(0));
    a.handle("close chat gpt tab", &text(1));
    let refused = a.handle("close the fridge", &text(2));
    assert_eq!(
        a.dispatcher().calls(),
        vec!["close_app:chrome", "close_tab:ChatGPT"]
    );
    assert_eq!(refused.replies, vec![replies::CANNOT_CLOSE.to_owned()]);
}

#[test]
fn greetings_and_fallback_draw_from_their_sets() {
    let mut a = assistant();
    let hello = a.handle("hello there", &text(0));
    assert!(GREETINGS.contains(&hello.replies[0].as_str()));
    let confused = a.handle("sing me a song", &text(1));
    assert!(CONFUSED.contains(&confused.replies[0].as_str()));
}

#[test]
fn smart_quotes_and_punctuation_are_tolerated() {
    let mut a = assistant();
    let turn = a.handle("What\u{2019}s the time?", &text(0));
    assert!(turn.replies[0].starts_with("It's "));
}

#[test]
fn last_command_is_recorded_after_wake_strip() {
    let mut a = assistant();
    a.handle("hey riva, what time is it", &voice(0));
    assert_eq!(stored(a.store()).last_command, "what time is it");
}
