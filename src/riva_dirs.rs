//! Centralized filesystem paths for Riva.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux | Windows |
//! |---------|-------|-------|---------|
//! | Data | `~/Library/Application Support/riva/` | `~/.local/share/riva/` | `%APPDATA%\riva\` |
//! | Config | `~/Library/Application Support/riva/` | `~/.config/riva/` | `%APPDATA%\riva\` |
//!
//! # Environment Overrides
//!
//! - `RIVA_DATA_DIR` overrides [`data_dir`]
//! - `RIVA_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root: session record and logs.
///
/// Resolves to `dirs::data_dir()/riva/` by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RIVA_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("riva"))
        .unwrap_or_else(|| std::env::temp_dir().join("riva-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/riva/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RIVA_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("riva"))
        .unwrap_or_else(|| std::env::temp_dir().join("riva-config"))
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted session record (`data_dir()/session.json`).
#[must_use]
pub fn session_file() -> PathBuf {
    data_dir().join("session.json")
}
