//! Configuration types for the assistant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RivaConfig {
    /// Identity of the assistant (name, creator, accepted mis-hearings).
    pub assistant: AssistantConfig,
    /// Wake gate settings.
    pub wake: WakeConfig,
    /// Session record persistence.
    pub session: SessionConfig,
    /// Speech output settings.
    pub speech: SpeechConfig,
    /// Host action settings (editor, folder, browser).
    pub host: HostConfig,
}

/// Assistant identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Display name, also the wake name (matched case-insensitively).
    pub name: String,
    /// Who built the assistant, used in the introduction.
    pub creator: String,
    /// Common speech-to-text confusions of the name, accepted as the name.
    pub name_variants: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Riva".to_owned(),
            creator: "MD. Rifat Islam Rizvi".to_owned(),
            name_variants: vec![
                "reva".to_owned(),
                "reeva".to_owned(),
                "rivah".to_owned(),
                "riba".to_owned(),
            ],
        }
    }
}

impl AssistantConfig {
    /// Lowercase name plus all variants, longest first.
    #[must_use]
    pub fn name_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = std::iter::once(&self.name)
            .chain(self.name_variants.iter())
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
        tokens.dedup();
        tokens
    }
}

/// Wake gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeConfig {
    /// Greeting tokens that, followed by the name, form a wake phrase.
    pub greetings: Vec<String>,
    /// Length of the awake window in seconds.
    ///
    /// `None` keeps the assistant awake until a sleep or exit phrase.
    pub window_secs: Option<u64>,
    /// Whether voice mode requires the wake phrase.
    pub voice_requires_wake: bool,
    /// Whether text mode requires the wake phrase.
    pub text_requires_wake: bool,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            greetings: ["hi", "hey", "hello", "high", "ok", "okay"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            window_secs: None,
            voice_requires_wake: true,
            text_requires_wake: false,
        }
    }
}

/// Session record settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the session record. `None` uses [`crate::riva_dirs::session_file`].
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolved session record path.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::riva_dirs::session_file)
    }
}

/// Speech output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Pause after speech ends before the next utterance is accepted (ms).
    pub post_speak_cooldown_ms: u64,
    /// External text-to-speech program (e.g. `espeak`, `say`, `spd-say`).
    ///
    /// The sanitized reply is passed as the last argument. `None` prints only.
    pub tts_command: Option<String>,
    /// Extra arguments placed before the reply text.
    pub tts_args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            post_speak_cooldown_ms: 450,
            tts_command: None,
            tts_args: Vec::new(),
        }
    }
}

/// Host action configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Editor launcher looked up on `PATH`.
    pub editor_command: String,
    /// Folder opened by "open folder". `None` uses the working directory.
    pub folder: Option<PathBuf>,
    /// Browser program used for sites. `None` uses the platform opener.
    pub browser_command: Option<String>,
    /// Seconds to wait before powering off, so the goodbye can be heard.
    pub shutdown_delay_secs: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            editor_command: "code".to_owned(),
            folder: None,
            browser_command: None,
            shutdown_delay_secs: 5,
        }
    }
}

impl RivaConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::RivaError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::RivaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::riva_dirs::config_file()
    }

    /// Load the default config file if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be parsed.
    pub fn load_or_default() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}
