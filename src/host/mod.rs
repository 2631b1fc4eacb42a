//! Real host actions: launching, closing, battery and power.
//!
//! Every method is best-effort. Failures are logged and reported as
//! [`DispatchOutcome::failed`] so the dialogue can say so and move on.

pub mod battery;
pub mod process;

use crate::config::HostConfig;
use crate::dispatch::{ActionDispatcher, DispatchOutcome};
use crate::error::{Result, RivaError};
use process::{COMMAND_TIMEOUT, locate, run_command, spawn_detached};
use std::path::PathBuf;
use tracing::{info, warn};

/// [`ActionDispatcher`] that acts on the local machine.
#[derive(Debug, Clone)]
pub struct SystemDispatcher {
    editor_command: String,
    folder: Option<PathBuf>,
    browser_command: Option<String>,
    shutdown_delay_secs: u32,
}

impl SystemDispatcher {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            editor_command: config.editor_command.clone(),
            folder: config.folder.clone(),
            browser_command: config.browser_command.clone(),
            shutdown_delay_secs: config.shutdown_delay_secs,
        }
    }

    fn working_folder(&self) -> Result<PathBuf> {
        match &self.folder {
            Some(folder) => Ok(folder.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Platform program that opens files, folders and URLs.
    fn opener() -> Result<PathBuf> {
        if cfg!(target_os = "windows") {
            locate("explorer")
        } else if cfg!(target_os = "macos") {
            locate("open")
        } else {
            locate("xdg-open")
        }
    }

    fn close_browser_tab(site: &str) -> Result<()> {
        if !cfg!(target_os = "linux") {
            return Err(RivaError::Dispatch(
                "closing tabs is only supported with xdotool on Linux".to_owned(),
            ));
        }
        locate("xdotool")?;
        let windows = run_command("xdotool", &["search", "--name", site], COMMAND_TIMEOUT)?;
        let window = windows
            .lines()
            .map(str::trim)
            .find(|id| !id.is_empty())
            .ok_or_else(|| RivaError::Dispatch(format!("no window titled like {site}")))?;
        run_command(
            "xdotool",
            &["windowactivate", "--sync", window, "key", "--clearmodifiers", "ctrl+w"],
            COMMAND_TIMEOUT,
        )?;
        Ok(())
    }

    fn power_off(delay_secs: u32) -> Result<()> {
        if cfg!(target_os = "windows") {
            let delay = delay_secs.to_string();
            run_command("shutdown", &["/s", "/t", delay.as_str()], COMMAND_TIMEOUT)?;
        } else {
            // `shutdown` only takes minutes on unix, so delay in a shell.
            let script = format!("sleep {delay_secs} && shutdown -h now");
            spawn_detached(&locate("sh")?, &["-c", script.as_str()])?;
        }
        Ok(())
    }
}

/// Log and fold a host result into an outcome.
fn outcome(action: &str, result: Result<()>) -> DispatchOutcome {
    match result {
        Ok(()) => {
            info!(action, "host action started");
            DispatchOutcome::ok()
        }
        Err(e) => {
            warn!(action, error = %e, "host action failed");
            DispatchOutcome::failed()
        }
    }
}

impl ActionDispatcher for SystemDispatcher {
    fn open_editor(&self) -> DispatchOutcome {
        let result =
            locate(&self.editor_command).and_then(|editor| spawn_detached(&editor, &[]));
        outcome("open_editor", result)
    }

    fn open_folder(&self) -> DispatchOutcome {
        let result = self.working_folder().and_then(|folder| {
            let folder = folder.to_string_lossy().into_owned();
            spawn_detached(&Self::opener()?, &[folder.as_str()])
        });
        outcome("open_folder", result)
    }

    fn open_url(&self, url: &str) -> DispatchOutcome {
        let result = url::Url::parse(url)
            .map_err(|e| RivaError::Dispatch(format!("invalid URL {url}: {e}")))
            .and_then(|parsed| match parsed.scheme() {
                "http" | "https" => Ok(parsed),
                other => Err(RivaError::Dispatch(format!("refusing to open {other} URL"))),
            })
            .and_then(|parsed| {
                let program = match &self.browser_command {
                    Some(browser) => locate(browser)?,
                    None => Self::opener()?,
                };
                spawn_detached(&program, &[parsed.as_str()])
            });
        outcome("open_url", result)
    }

    fn close_app(&self, process: &str) -> DispatchOutcome {
        let result = if cfg!(target_os = "windows") {
            let image = format!("{process}.exe");
            run_command("taskkill", &["/IM", image.as_str(), "/F"], COMMAND_TIMEOUT).map(drop)
        } else {
            run_command("pkill", &["-x", process], COMMAND_TIMEOUT).map(drop)
        };
        outcome("close_app", result)
    }

    fn close_tab(&self, site: &str) -> DispatchOutcome {
        outcome("close_tab", Self::close_browser_tab(site))
    }

    fn battery_percent(&self) -> DispatchOutcome {
        match battery::read_percent() {
            Some(percent) => DispatchOutcome::ok_with(percent.to_string()),
            None => {
                warn!("no readable battery");
                DispatchOutcome::failed()
            }
        }
    }

    fn shutdown(&self) -> DispatchOutcome {
        outcome("shutdown", Self::power_off(self.shutdown_delay_secs))
    }
}
