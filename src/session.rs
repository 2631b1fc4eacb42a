//! Persistent session record and its stores.
//!
//! One record per installation, read fully at the start of a turn and written
//! fully after it ("load, mutate, save"). A missing or unreadable record is
//! replaced by defaults; a failed write loses only that turn's mutation.

use crate::dispatch::{ActionKind, ActionRequest};
use crate::error::{Result, RivaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Current schema version of [`SessionState`].
pub const SESSION_VERSION: u32 = 1;

/// The "asleep" instant: any `awake_until` at or before now means asleep.
#[must_use]
pub fn asleep() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Dialogue state carried between utterances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub version: u32,
    /// Action waiting for a yes/no answer.
    pub pending_action: Option<ActionKind>,
    /// Target of the pending action. Meaningless without `pending_action`.
    pub pending_payload: Option<String>,
    /// Instant after which the session is asleep.
    pub awake_until: DateTime<Utc>,
    /// Instant until which wake reminders are suppressed.
    pub wake_reminder_until: DateTime<Utc>,
    /// Most recently routed utterance text.
    pub last_command: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            pending_action: None,
            pending_payload: None,
            awake_until: asleep(),
            wake_reminder_until: asleep(),
            last_command: String::new(),
        }
    }
}

impl SessionState {
    /// Whether an utterance at `now` falls inside the awake window.
    pub fn is_awake(&self, now: DateTime<Utc>) -> bool {
        now < self.awake_until
    }

    /// The armed confirmation, if any.
    pub fn pending(&self) -> Option<ActionRequest> {
        self.pending_action.map(|action| ActionRequest {
            action,
            payload: self.pending_payload.clone(),
        })
    }

    /// Arm a confirmation, replacing whatever was pending.
    pub fn arm(&mut self, action: ActionKind, payload: Option<String>) {
        if let Some(previous) = self.pending_action {
            debug!(%previous, replacement = %action, "overwriting pending confirmation");
        }
        self.pending_action = Some(action);
        self.pending_payload = payload;
    }

    /// Drop any pending confirmation together with its payload.
    pub fn clear_pending(&mut self) {
        self.pending_action = None;
        self.pending_payload = None;
    }

    /// Extend the awake window to `until`. Never moves it backwards.
    pub fn wake_until(&mut self, until: DateTime<Utc>) {
        if until > self.awake_until {
            self.awake_until = until;
        }
        self.wake_reminder_until = asleep();
    }

    /// Close the awake window immediately.
    pub fn sleep(&mut self) {
        self.awake_until = asleep();
        self.wake_reminder_until = asleep();
    }

    /// Repair records written by older builds or edited by hand.
    fn repaired(mut self) -> Self {
        if self.pending_action.is_none() {
            self.pending_payload = None;
        }
        self.version = SESSION_VERSION;
        self
    }
}

/// Durable storage for the session record.
pub trait SessionStore {
    /// Load the record. Never fails: unreadable state yields defaults.
    fn load(&self) -> SessionState;

    /// Persist the whole record.
    ///
    /// # Errors
    ///
    /// Returns [`RivaError::Session`] if the record could not be written.
    fn save(&self, state: &SessionState) -> Result<()>;
}

/// Session record stored as pretty JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_location() -> Self {
        Self::new(crate::riva_dirs::session_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> SessionState {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session record yet, starting fresh");
                return SessionState::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read session record, starting fresh");
                return SessionState::default();
            }
        };

        match serde_json::from_slice::<SessionState>(&bytes) {
            Ok(state) => state.repaired(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed session record, starting fresh");
                SessionState::default()
            }
        }
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RivaError::Session(format!(
                    "cannot create session directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| RivaError::Session(format!("cannot serialize session: {e}")))?;

        // Write-then-rename so a crash never leaves a half-written record.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            RivaError::Session(format!("cannot write session to {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            RivaError::Session(format!(
                "cannot move session into place at {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}

/// In-process store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
    fail_saves: bool,
}

impl MemorySessionStore {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
            fail_saves: false,
        }
    }

    /// A store whose saves always fail, for exercising write-failure paths.
    pub fn with_failing_saves(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
            fail_saves: true,
        }
    }

    /// Snapshot of the stored record.
    pub fn snapshot(&self) -> SessionState {
        self.load()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        if self.fail_saves {
            return Err(RivaError::Session("in-memory store rejects writes".to_owned()));
        }
        let mut guard = self
            .state
            .lock()
            .map_err(|_| RivaError::Session("session lock poisoned".to_owned()))?;
        *guard = state.clone();
        Ok(())
    }
}
