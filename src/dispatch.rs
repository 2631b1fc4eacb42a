//! Host actions and the capability interface that performs them.
//!
//! The dialogue engine never touches processes, browsers or power state
//! itself. It resolves an [`ActionRequest`] and hands it to an
//! [`ActionDispatcher`]; the boolean outcome picks the spoken follow-up.

use serde::{Deserialize, Serialize};

/// Closed set of resolvable intents that carry a host side effect.
///
/// Plain enumeration: any target travels in the request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Power off the machine.
    Shutdown,
    /// Launch the code editor.
    #[serde(alias = "open_vscode")]
    OpenEditor,
    /// Open the working folder in the file manager.
    OpenFolder,
    /// Open the payload URL in the browser.
    OpenBrowser,
    /// Close the application whose process name is the payload.
    CloseApp,
    /// Close the browser tab whose title matches the payload.
    CloseTab,
    /// Report the battery percentage.
    CheckBattery,
    /// A persisted action this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Shutdown => "shutdown",
            Self::OpenEditor => "open_editor",
            Self::OpenFolder => "open_folder",
            Self::OpenBrowser => "open_browser",
            Self::CloseApp => "close_app",
            Self::CloseTab => "close_tab",
            Self::CheckBattery => "check_battery",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A resolved intent handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: ActionKind,
    pub payload: Option<String>,
}

impl ActionRequest {
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            payload: None,
        }
    }

    pub fn with_payload(action: ActionKind, payload: impl Into<String>) -> Self {
        Self {
            action,
            payload: Some(payload.into()),
        }
    }
}

/// Result of a host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub succeeded: bool,
    /// Value reported back to the user (battery percentage).
    pub detail: Option<String>,
}

impl DispatchOutcome {
    pub fn ok() -> Self {
        Self {
            succeeded: true,
            detail: None,
        }
    }

    pub fn ok_with(detail: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            detail: Some(detail.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            succeeded: false,
            detail: None,
        }
    }
}

/// Capability interface for host side effects, one method per action family.
///
/// Implementations are best-effort: failures are reported through
/// [`DispatchOutcome::succeeded`], never by panicking.
pub trait ActionDispatcher {
    /// Launch the code editor.
    fn open_editor(&self) -> DispatchOutcome;

    /// Open the working folder in the platform file manager.
    fn open_folder(&self) -> DispatchOutcome;

    /// Open `url` in the browser.
    fn open_url(&self, url: &str) -> DispatchOutcome;

    /// Close every running instance of `process`.
    fn close_app(&self, process: &str) -> DispatchOutcome;

    /// Close the browser tab titled like `site`.
    fn close_tab(&self, site: &str) -> DispatchOutcome;

    /// Read the battery charge. The percentage goes in `detail`.
    fn battery_percent(&self) -> DispatchOutcome;

    /// Power off the machine.
    fn shutdown(&self) -> DispatchOutcome;
}

/// Route `request` to the matching dispatcher method.
///
/// Requests whose payload is required but missing fail without touching the
/// host. [`ActionKind::Unknown`] is never dispatched and reports failure.
pub fn dispatch(dispatcher: &dyn ActionDispatcher, request: &ActionRequest) -> DispatchOutcome {
    let payload = request.payload.as_deref();
    let outcome = match (request.action, payload) {
        (ActionKind::Shutdown, _) => dispatcher.shutdown(),
        (ActionKind::OpenEditor, _) => dispatcher.open_editor(),
        (ActionKind::OpenFolder, _) => dispatcher.open_folder(),
        (ActionKind::CheckBattery, _) => dispatcher.battery_percent(),
        (ActionKind::OpenBrowser, Some(url)) => dispatcher.open_url(url),
        (ActionKind::CloseApp, Some(process)) => dispatcher.close_app(process),
        (ActionKind::CloseTab, Some(site)) => dispatcher.close_tab(site),
        (ActionKind::OpenBrowser | ActionKind::CloseApp | ActionKind::CloseTab, None) => {
            tracing::warn!(action = %request.action, "action requires a payload, skipping");
            DispatchOutcome::failed()
        }
        (ActionKind::Unknown, _) => DispatchOutcome::failed(),
    };
    tracing::info!(
        action = %request.action,
        payload = ?request.payload,
        succeeded = outcome.succeeded,
        "dispatched host action"
    );
    outcome
}
