//! Spoken output: sanitizing, sinks, and the turn lock between speaking and
//! listening.
//!
//! The assistant must never hear itself. [`SpeechTurn`] serializes replies
//! and remembers when the last one finished; the input loop awaits
//! [`SpeechTurn::wait_until_clear`] before accepting the next voice
//! utterance.

use crate::config::SpeechConfig;
use crate::error::{Result, RivaError};
use std::path::PathBuf;
use std::sync::{Mutex, TryLockError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use unicode_normalization::char::is_combining_mark;

/// Punctuation that text-to-speech engines pronounce sensibly.
const SPEAKABLE_PUNCTUATION: &[char] = &[
    '.', ',', '?', '!', ':', ';', '-', '(', ')', '[', ']', '{', '}', '\'', '"', '/', '\\',
    '\u{0964}', // Devanagari/Bengali danda
    '\u{2014}', // em dash
];

/// How often [`SpeechTurn::wait_until_clear`] re-checks while speech is playing.
const SPEAKING_POLL: Duration = Duration::from_millis(50);

/// Strip characters that speech engines read awkwardly.
///
/// Keeps letters, digits and combining marks in any script, whitespace (as a
/// plain space) and a small set of punctuation. Drops emoji, symbols and control
/// characters, then collapses whitespace.
pub fn sanitize_for_speech(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_alphanumeric()
                || is_combining_mark(c)
                || SPEAKABLE_PUNCTUATION.contains(&c)
            {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A place replies are spoken or written to.
pub trait SpeechOutput: Send + Sync {
    /// Render one already-sanitized line. Blocks until done.
    fn say(&self, line: &str) -> Result<()>;
}

/// Prints replies to stdout as `Name: line`.
#[derive(Debug, Clone)]
pub struct ConsoleSpeaker {
    label: String,
}

impl ConsoleSpeaker {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl SpeechOutput for ConsoleSpeaker {
    fn say(&self, line: &str) -> Result<()> {
        println!("{}: {line}", self.label);
        Ok(())
    }
}

/// Prints replies and reads them aloud through an external TTS program.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    console: ConsoleSpeaker,
    program: PathBuf,
    args: Vec<String>,
}

impl CommandSpeaker {
    /// Build a speaker from config. `None` when no TTS command is configured.
    ///
    /// # Errors
    ///
    /// Returns [`RivaError::Speech`] if the configured program is not on `PATH`.
    pub fn from_config(config: &SpeechConfig, label: &str) -> Result<Option<Self>> {
        let Some(command) = config.tts_command.as_deref() else {
            return Ok(None);
        };
        let program = which::which(command)
            .map_err(|e| RivaError::Speech(format!("TTS command `{command}` not found: {e}")))?;
        Ok(Some(Self {
            console: ConsoleSpeaker::new(label),
            program,
            args: config.tts_args.clone(),
        }))
    }
}

impl SpeechOutput for CommandSpeaker {
    fn say(&self, line: &str) -> Result<()> {
        self.console.say(line)?;
        let status = std::process::Command::new(&self.program)
            .args(&self.args)
            .arg(line)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map_err(|e| {
                RivaError::Speech(format!("failed to run {}: {e}", self.program.display()))
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(RivaError::Speech(format!(
                "{} exited with code {}",
                self.program.display(),
                status.code().unwrap_or(-1)
            )))
        }
    }
}

/// Serializes speech and enforces a quiet period before listening resumes.
#[derive(Debug)]
pub struct SpeechTurn {
    speaking: Mutex<()>,
    last_end: Mutex<Option<Instant>>,
    cooldown: Duration,
}

impl SpeechTurn {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            speaking: Mutex::new(()),
            last_end: Mutex::new(None),
            cooldown,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(Duration::from_millis(config.post_speak_cooldown_ms))
    }

    /// Sanitize `text` and speak it while holding the turn.
    ///
    /// Lines that sanitize to nothing are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the output's error. The cooldown starts either way.
    pub fn speak(&self, output: &dyn SpeechOutput, text: &str) -> Result<()> {
        let line = sanitize_for_speech(text);
        if line.is_empty() {
            debug!("nothing speakable in reply, skipping");
            return Ok(());
        }

        let _turn = self
            .speaking
            .lock()
            .map_err(|_| RivaError::Speech("speech lock poisoned".to_owned()))?;
        let result = output.say(&line);
        if let Ok(mut last_end) = self.last_end.lock() {
            *last_end = Some(Instant::now());
        }
        result
    }

    /// Speak every line in order, logging failures instead of stopping.
    pub fn speak_all<I, L>(&self, output: &dyn SpeechOutput, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        for line in lines {
            if let Err(e) = self.speak(output, line.as_ref()) {
                warn!(error = %e, "could not speak reply");
            }
        }
    }

    /// Whether a reply is being spoken right now.
    pub fn is_speaking(&self) -> bool {
        matches!(self.speaking.try_lock(), Err(TryLockError::WouldBlock))
    }

    /// Time left before it is safe to listen, measured at `now`.
    pub fn remaining_cooldown(&self, now: Instant) -> Duration {
        let last_end = self.last_end.lock().ok().and_then(|guard| *guard);
        match last_end {
            Some(end) => self.cooldown.saturating_sub(now.saturating_duration_since(end)),
            None => Duration::ZERO,
        }
    }

    /// Wait until nothing is being spoken and the cooldown has passed.
    pub async fn wait_until_clear(&self) {
        loop {
            if self.is_speaking() {
                tokio::time::sleep(SPEAKING_POLL).await;
                continue;
            }
            let remaining = self.remaining_cooldown(Instant::now());
            if remaining.is_zero() {
                return;
            }
            tokio::time::sleep(remaining).await;
        }
    }
}
