//! Pending confirmation captures the next utterance.

use crate::helpers::{assistant, assistant_with, stored, text, voice};
use riva::replies;
use riva::session::SessionState;
use riva::test_utils::RecordingDispatcher;
use riva::{ActionKind, Assistant, MemorySessionStore, RandomPicker, RivaConfig};

#[test]
fn non_answers_only_reprompt() {
    let mut a = assistant();
    a.handle("open my folder", &text(0));
    let pending = stored(a.store());
    assert_eq!(pending.pending_action, Some(ActionKind::OpenFolder));

    for utterance in ["what time is it", "open vs code", "hello", "close chrome"] {
        let turn = a.handle(utterance, &text(1));
        assert_eq!(turn.replies, vec![replies::CONFIRM_OR_CANCEL.to_owned()]);
        assert_eq!(stored(a.store()), pending);
    }
    assert!(a.dispatcher().calls().is_empty());
}

#[test]
fn never_mind_cancels() {
    let mut a = assistant();
    a.handle("shutdown", &text(0));
    let turn = a.handle("never mind", &text(1));
    assert_eq!(turn.replies, vec![replies::CANCELLED.to_owned()]);
    assert!(stored(a.store()).pending().is_none());
    assert!(a.dispatcher().calls().is_empty());
}

#[test]
fn rearming_overwrites_previous_pending() {
    let mut state = SessionState::default();
    state.arm(ActionKind::OpenFolder, None);
    let mut a = assistant_with(RivaConfig::default(), state);
    a.handle("no", &text(0));
    a.handle("open the code", &text(1));
    assert_eq!(stored(a.store()).pending_action, Some(ActionKind::OpenEditor));
}

#[test]
fn failed_confirmed_action_still_clears_pending() {
    let mut state = SessionState::default();
    state.arm(ActionKind::Shutdown, None);
    let mut a = Assistant::new(
        &RivaConfig::default(),
        MemorySessionStore::new(state),
        RecordingDispatcher::default().failing("shutdown"),
        RandomPicker::seeded(crate::helpers::SEED),
    );
    let turn = a.handle("sure", &voice(0));
    assert_eq!(turn.dispatched, Some(false));
    assert_eq!(turn.replies.last().unwrap(), replies::DISPATCH_FAILED);
    assert!(a.store().snapshot().pending().is_none());
}

#[test]
fn battery_failure_has_its_own_reply() {
    let mut a = Assistant::new(
        &RivaConfig::default(),
        MemorySessionStore::default(),
        RecordingDispatcher::default().with_battery(None),
        RandomPicker::seeded(crate::helpers::SEED),
    );
    let turn = a.handle("battery", &text(0));
    assert_eq!(turn.replies, vec![replies::BATTERY_UNAVAILABLE.to_owned()]);
}
