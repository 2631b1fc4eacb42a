//! Battery level readers for each platform.

use super::process::{COMMAND_TIMEOUT, run_command};
use std::path::Path;
use tracing::debug;

/// Where Linux exposes power supplies.
pub const SYSFS_POWER_SUPPLY: &str = "/sys/class/power_supply";

/// Current charge in percent, if the machine has a readable battery.
pub fn read_percent() -> Option<u8> {
    if cfg!(target_os = "windows") {
        let out = run_command(
            "WMIC",
            &["Path", "Win32_Battery", "Get", "EstimatedChargeRemaining"],
            COMMAND_TIMEOUT,
        )
        .map_err(|e| debug!(error = %e, "WMIC battery query failed"))
        .ok()?;
        parse_wmic(&out)
    } else if cfg!(target_os = "macos") {
        let out = run_command("pmset", &["-g", "batt"], COMMAND_TIMEOUT)
            .map_err(|e| debug!(error = %e, "pmset battery query failed"))
            .ok()?;
        parse_pmset(&out)
    } else {
        read_sysfs(Path::new(SYSFS_POWER_SUPPLY))
    }
}

/// First `Battery`-type supply under `root` with a readable capacity.
pub fn read_sysfs(root: &Path) -> Option<u8> {
    let mut supplies: Vec<_> = std::fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    supplies.sort();

    supplies.into_iter().find_map(|dir| {
        let kind = std::fs::read_to_string(dir.join("type")).ok()?;
        if kind.trim() != "Battery" {
            return None;
        }
        let capacity = std::fs::read_to_string(dir.join("capacity")).ok()?;
        parse_percent(capacity.trim())
    })
}

/// Percentage from `pmset -g batt`, e.g. `-InternalBattery-0 (id=1)	87%; charging`.
pub fn parse_pmset(output: &str) -> Option<u8> {
    output
        .split(|c: char| c.is_whitespace() || c == ';')
        .find_map(|token| token.strip_suffix('%'))
        .and_then(parse_percent)
}

/// Percentage from `WMIC ... Get EstimatedChargeRemaining`.
pub fn parse_wmic(output: &str) -> Option<u8> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(parse_percent)
}

fn parse_percent(raw: &str) -> Option<u8> {
    raw.parse::<u8>().ok().filter(|p| *p <= 100)
}
