//! Child process helpers for host actions.

use crate::error::{Result, RivaError};
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default limit for commands whose output we wait for.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `program` to completion with a timeout, returning stdout.
///
/// # Errors
///
/// Returns [`RivaError::Dispatch`] if the program cannot be started, exits
/// non-zero, or outlives `timeout`.
pub fn run_command(program: &str, args: &[&str], timeout: Duration) -> Result<String> {
    let start = Instant::now();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RivaError::Dispatch(format!("failed to spawn {program}: {e}")))?;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = read_pipe(child.stdout.take());
                let stderr = read_pipe(child.stderr.take());

                if !status.success() {
                    let code = status.code().unwrap_or(-1);
                    let output = if stderr.is_empty() { stdout } else { stderr };
                    return Err(RivaError::Dispatch(format!(
                        "{program} exited with code {code}: {}",
                        output.trim()
                    )));
                }
                return Ok(stdout);
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RivaError::Dispatch(format!(
                        "{program} timed out after {}s",
                        timeout.as_secs()
                    )));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(RivaError::Dispatch(format!(
                    "failed to check {program} status: {e}"
                )));
            }
        }
    }
}

fn read_pipe(pipe: Option<impl Read>) -> String {
    pipe.map(|mut p| {
        let mut buf = String::new();
        p.read_to_string(&mut buf).unwrap_or(0);
        buf
    })
    .unwrap_or_default()
}

/// Start `program` without waiting for it (editors, browsers, file managers).
///
/// # Errors
///
/// Returns [`RivaError::Dispatch`] if the program cannot be started.
pub fn spawn_detached(program: &Path, args: &[&str]) -> Result<()> {
    spawn_reaped(program, args).map(drop)
}

/// Start `program` and wait for it on a background thread so the exited
/// child is reaped. The handle yields its exit status.
fn spawn_reaped(program: &Path, args: &[&str]) -> Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| RivaError::Dispatch(format!("failed to start {}: {e}", program.display())))?;
    let name = program.display().to_string();
    Ok(std::thread::spawn(move || match child.wait() {
        Ok(status) => {
            debug!(program = %name, %status, "detached child exited");
            Some(status)
        }
        Err(e) => {
            debug!(program = %name, error = %e, "could not wait on detached child");
            None
        }
    }))
}

/// Locate `name` on `PATH`.
///
/// # Errors
///
/// Returns [`RivaError::Dispatch`] if it is not installed.
pub fn locate(name: &str) -> Result<std::path::PathBuf> {
    which::which(name).map_err(|e| RivaError::Dispatch(format!("`{name}` not found: {e}")))
}
