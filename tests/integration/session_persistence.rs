//! Session record survives restarts and tolerates damage.

use crate::helpers::{json_assistant, stored, text, voice};
use riva::session::asleep;
use riva::{ActionKind, JsonSessionStore, SessionStore};

#[test]
fn pending_confirmation_survives_restart() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut first = json_assistant(dir.path());
    first.handle("shutdown", &text(0));
    drop(first);

    let mut second = json_assistant(dir.path());
    assert_eq!(
        stored(second.store()).pending_action,
        Some(ActionKind::Shutdown)
    );
    second.handle("yes", &text(1));
    assert_eq!(second.dispatcher().calls(), vec!["shutdown"]);
    assert!(stored(second.store()).pending_action.is_none());
}

#[test]
fn awake_window_survives_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    json_assistant(dir.path()).handle("hey riva", &voice(0));

    let mut restarted = json_assistant(dir.path());
    let turn = restarted.handle("battery", &voice(10));
    assert_eq!(turn.dispatched, Some(true));
}

#[test]
fn corrupt_record_starts_fresh() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("session.json"), b"\x00\x01 garbage").unwrap();

    let mut a = json_assistant(dir.path());
    assert!(a.handle("battery", &voice(0)).is_silent());
    let turn = a.handle("battery", &text(0));
    assert_eq!(turn.dispatched, Some(true));
    assert!(turn.saved);

    // The next save replaced the damaged file with a valid record.
    let reloaded = JsonSessionStore::new(dir.path().join("session.json")).load();
    assert_eq!(reloaded.last_command, "battery");
}

#[test]
fn partial_record_fills_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("session.json"),
        r#"{ "last_command": "open folder" }"#,
    )
    .unwrap();

    let state = JsonSessionStore::new(dir.path().join("session.json")).load();
    assert_eq!(state.last_command, "open folder");
    assert!(state.pending_action.is_none());
    assert_eq!(state.awake_until, asleep());
}

#[test]
fn exit_persists_sleep() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut a = json_assistant(dir.path());
    a.handle("hi riva", &voice(0));
    assert!(a.handle("exit", &voice(1)).exit);

    let restarted = json_assistant(dir.path());
    assert_eq!(stored(restarted.store()).awake_until, asleep());
}
