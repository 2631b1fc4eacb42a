//! CLI binary for riva.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use riva::session::SessionState;
use riva::speech::{CommandSpeaker, ConsoleSpeaker, SpeechOutput, SpeechTurn};
use riva::{
    Assistant, JsonSessionStore, MemorySessionStore, RandomPicker, RivaConfig, SessionStore,
    SystemDispatcher, TurnContext,
};
use std::path::PathBuf;
use std::io::BufRead;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Riva: a local command assistant for voice and text.
///
/// Voice mode reads one transcribed utterance per line from stdin (pipe a
/// speech-to-text tool into it) and requires the wake phrase. Text mode
/// reads typed commands and does not.
#[derive(Parser)]
#[command(name = "riva", version, about)]
struct Cli {
    /// Typed commands; the wake phrase is optional.
    #[arg(short, long, conflicts_with = "voice")]
    text: bool,

    /// Transcribed speech; the wake phrase is required (default).
    #[arg(short, long)]
    voice: bool,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Awake window after a wake phrase, in seconds.
    #[arg(long)]
    window_secs: Option<u64>,

    /// Keep session state in memory only.
    #[arg(long)]
    ephemeral: bool,

    /// Write logs to a daily file under the data directory instead of stderr.
    #[arg(long)]
    log_file: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to the config file path.
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(RivaConfig::default_config_path);
    let mut config = if cli.config.is_some() {
        RivaConfig::from_file(&config_path)
            .with_context(|| format!("loading config from {}", config_path.display()))?
    } else {
        RivaConfig::load_or_default().context("loading default config")?
    };
    if let Some(secs) = cli.window_secs {
        config.wake.window_secs = Some(secs);
    }

    if let Some(Command::Config { write }) = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        if write {
            config.save_to_file(&config_path)?;
            eprintln!("wrote {}", config_path.display());
        }
        return Ok(());
    }

    let mode = if cli.text { Mode::Text } else { Mode::Voice };
    if cli.ephemeral {
        let store = MemorySessionStore::new(SessionState::default());
        run(config, mode, store).await
    } else {
        let store = JsonSessionStore::new(config.session.resolved_path());
        info!(path = %store.path().display(), "using session record");
        run(config, mode, store).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Voice,
}

fn init_tracing(log_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("riva=info"));

    if log_file {
        let dir = riva::riva_dirs::logs_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "riva.log"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        // stdout carries the conversation, so logs go to stderr.
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

async fn run<S: SessionStore>(config: RivaConfig, mode: Mode, store: S) -> anyhow::Result<()> {
    let name = config.assistant.name.clone();
    let speaker: Box<dyn SpeechOutput> = match CommandSpeaker::from_config(&config.speech, &name)
    {
        Ok(Some(speaker)) => Box::new(speaker),
        Ok(None) => Box::new(ConsoleSpeaker::new(&name)),
        Err(e) => {
            warn!(error = %e, "text-to-speech unavailable, printing replies only");
            Box::new(ConsoleSpeaker::new(&name))
        }
    };
    let speech = SpeechTurn::from_config(&config.speech);
    let say = |lines: &[String]| {
        tokio::task::block_in_place(|| speech.speak_all(speaker.as_ref(), lines));
    };

    let wake_required = match mode {
        Mode::Text => config.wake.text_requires_wake,
        Mode::Voice => config.wake.voice_requires_wake,
    };

    let mut assistant = Assistant::new(
        &config,
        store,
        SystemDispatcher::new(&config.host),
        RandomPicker::from_entropy(),
    );

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel_clone.cancel();
        }
    });

    match mode {
        Mode::Text => {
            eprintln!("[mode] TEXT: type commands at 'You>'");
            say(&[riva::replies::introduction(assistant.identity())]);
            eprintln!("Tip: type 'help' to see what I can do.");
        }
        Mode::Voice => {
            eprintln!("[mode] VOICE: reading transcriptions from stdin");
            say(&[format!(
                "Voice mode is running. Say 'hi {0}' or 'hey {0}' to wake me up.",
                name.to_lowercase()
            )]);
        }
    }

    let mut lines = stdin_lines();
    loop {
        if mode == Mode::Voice {
            speech.wait_until_clear().await;
        } else {
            eprint!("You> ");
        }

        let line = tokio::select! {
            () = cancel.cancelled() => None,
            next = lines.recv() => next.transpose().context("reading stdin")?,
        };
        let Some(line) = line else {
            say(&[riva::replies::GOODBYE.to_owned()]);
            break;
        };

        let turn = assistant.handle(&line, &TurnContext::at(Utc::now(), wake_required));
        say(&turn.replies);
        if turn.exit {
            break;
        }
    }

    Ok(())
}

/// Read stdin lines on a plain thread so a pending read never holds the
/// runtime open after Ctrl+C. The channel closes at EOF.
fn stdin_lines() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}
