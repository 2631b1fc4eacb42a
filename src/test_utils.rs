//! Test doubles shared by unit tests and the integration test binary.
//!
//! [`RecordingDispatcher`] stands in for the host: it records every call as
//! `"method:payload"` and answers with configurable success.

use crate::dispatch::{ActionDispatcher, DispatchOutcome};
use std::collections::HashSet;
use std::sync::Mutex;

/// Fake [`ActionDispatcher`] that records calls instead of touching the host.
#[derive(Debug)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<String>>,
    failing: HashSet<&'static str>,
    battery: Option<u8>,
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            battery: Some(80),
        }
    }
}

impl RecordingDispatcher {
    /// Make the named method (e.g. `"open_editor"`) report failure.
    #[must_use]
    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing.insert(method);
        self
    }

    /// Battery percentage to report; `None` simulates a machine without one.
    #[must_use]
    pub fn with_battery(mut self, percent: Option<u8>) -> Self {
        self.battery = percent;
        self
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn record(&self, method: &'static str, payload: Option<&str>) -> DispatchOutcome {
        let entry = match payload {
            Some(p) => format!("{method}:{p}"),
            None => method.to_owned(),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(entry);
        }
        if self.failing.contains(method) {
            DispatchOutcome::failed()
        } else {
            DispatchOutcome::ok()
        }
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn open_editor(&self) -> DispatchOutcome {
        self.record("open_editor", None)
    }

    fn open_folder(&self) -> DispatchOutcome {
        self.record("open_folder", None)
    }

    fn open_url(&self, url: &str) -> DispatchOutcome {
        self.record("open_url", Some(url))
    }

    fn close_app(&self, process: &str) -> DispatchOutcome {
        self.record("close_app", Some(process))
    }

    fn close_tab(&self, site: &str) -> DispatchOutcome {
        self.record("close_tab", Some(site))
    }

    fn battery_percent(&self) -> DispatchOutcome {
        let outcome = self.record("battery_percent", None);
        match (outcome.succeeded, self.battery) {
            (true, Some(percent)) => DispatchOutcome::ok_with(percent.to_string()),
            _ => DispatchOutcome::failed(),
        }
    }

    fn shutdown(&self) -> DispatchOutcome {
        self.record("shutdown", None)
    }
}
