//! Wake gate behaviour across turns.

use crate::helpers::{assistant, assistant_with, at, config_with_window, stored, text, voice};
use chrono::Duration;
use riva::session::{SessionState, asleep};

#[test]
fn asleep_voice_turns_are_silent_and_leave_state_alone() {
    let mut a = assistant();
    for utterance in ["open folder", "battery", "riva open folder", "hello"] {
        let turn = a.handle(utterance, &voice(0));
        assert!(turn.is_silent(), "{utterance}");
    }
    assert_eq!(stored(a.store()), SessionState::default());
    assert!(a.dispatcher().calls().is_empty());
}

#[test]
fn window_expires() {
    let mut a = assistant_with(config_with_window(60), SessionState::default());
    a.handle("hi riva", &voice(0));
    assert!(!a.handle("battery", &voice(59)).is_silent());
    assert!(a.handle("battery", &voice(60)).is_silent());
    assert_eq!(a.dispatcher().calls().len(), 1);
}

#[test]
fn window_covers_at_least_configured_length() {
    let mut a = assistant_with(config_with_window(300), SessionState::default());
    a.handle("okay reva", &voice(1_000));
    assert!(stored(a.store()).awake_until >= at(1_000) + Duration::seconds(300));
}

#[test]
fn rewake_never_shortens_window() {
    let mut state = SessionState::default();
    state.wake_until(at(10_000));
    let mut a = assistant_with(config_with_window(10), state);
    a.handle("hey riva", &voice(100));
    assert_eq!(stored(a.store()).awake_until, at(10_000));
}

#[test]
fn text_mode_is_never_gated() {
    let mut a = assistant();
    let turn = a.handle("battery", &text(0));
    assert_eq!(turn.dispatched, Some(true));
    assert_eq!(stored(a.store()).awake_until, asleep());
}

#[test]
fn sleep_phrase_closes_window_until_next_wake() {
    let mut a = assistant();
    a.handle("hi riva", &voice(0));
    a.handle("go to sleep", &voice(1));
    assert!(a.handle("battery", &voice(2)).is_silent());
    a.handle("hello riva", &voice(3));
    assert!(!a.handle("battery", &voice(4)).is_silent());
}

#[test]
fn misheard_name_still_wakes() {
    let mut a = assistant();
    let turn = a.handle("High, Reeva.", &voice(0));
    assert_eq!(turn.replies.len(), 1);
    assert!(stored(a.store()).is_awake(at(1)));
}
