//! Shared helpers for integration tests.

use chrono::{DateTime, Utc};
use riva::session::{MemorySessionStore, SessionState};
use riva::test_utils::RecordingDispatcher;
use riva::{Assistant, JsonSessionStore, RandomPicker, RivaConfig, SessionStore, TurnContext};

pub(crate) type MemoryAssistant = Assistant<MemorySessionStore, RecordingDispatcher, RandomPicker>;

/// Seed shared by every helper so reply choices are reproducible.
pub(crate) const SEED: u64 = 2024;

/// Assistant with default config, fresh in-memory state and a recording host.
pub(crate) fn assistant() -> MemoryAssistant {
    assistant_with(RivaConfig::default(), SessionState::default())
}

pub(crate) fn assistant_with(config: RivaConfig, state: SessionState) -> MemoryAssistant {
    Assistant::new(
        &config,
        MemorySessionStore::new(state),
        RecordingDispatcher::default(),
        RandomPicker::seeded(SEED),
    )
}

/// Assistant backed by a JSON record at `dir/session.json`.
pub(crate) fn json_assistant(
    dir: &std::path::Path,
) -> Assistant<JsonSessionStore, RecordingDispatcher, RandomPicker> {
    Assistant::new(
        &RivaConfig::default(),
        JsonSessionStore::new(dir.join("session.json")),
        RecordingDispatcher::default(),
        RandomPicker::seeded(SEED),
    )
}

/// Config with a finite awake window.
pub(crate) fn config_with_window(secs: u64) -> RivaConfig {
    let mut config = RivaConfig::default();
    config.wake.window_secs = Some(secs);
    config
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).expect("valid timestamp")
}

/// Voice turn: wake phrase required.
pub(crate) fn voice(secs: i64) -> TurnContext {
    TurnContext::at(at(secs), true)
}

/// Text turn: wake phrase optional.
pub(crate) fn text(secs: i64) -> TurnContext {
    TurnContext::at(at(secs), false)
}

/// Current stored state of any store.
pub(crate) fn stored<S: SessionStore>(store: &S) -> SessionState {
    store.load()
}
