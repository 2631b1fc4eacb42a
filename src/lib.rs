//! Riva: a local command assistant for voice and text.
//!
//! Each utterance flows through a small dialogue engine:
//! normalize → exit check → confirmation → wake gate → intent router →
//! host action. Session state (pending confirmation, awake window, last
//! command) is loaded and saved around every turn.
//!
//! # Architecture
//!
//! - **[`engine`]**: [`Assistant::handle`], the per-turn entry point
//! - **[`wake`]**: wake phrase detection and the awake window
//! - **[`confirm`]**: the single-slot yes/no dialogue
//! - **[`router`]**: the ordered intent table
//! - **[`dispatch`]**: the [`ActionDispatcher`] capability trait
//! - **[`host`]**: [`SystemDispatcher`], the real machine behind it
//! - **[`session`]**: the persisted record and its stores
//! - **[`speech`]**: sanitizing, output sinks and the speak/listen turn lock

pub mod config;
pub mod confirm;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod host;
pub mod mood;
pub mod normalize;
pub mod replies;
pub mod riva_dirs;
pub mod router;
pub mod session;
pub mod speech;
pub mod targets;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod wake;

pub use config::RivaConfig;
pub use dispatch::{ActionDispatcher, ActionKind, ActionRequest, DispatchOutcome};
pub use engine::{Assistant, Turn, TurnContext};
pub use error::{Result, RivaError};
pub use host::SystemDispatcher;
pub use replies::{RandomPicker, ReplyPicker};
pub use session::{JsonSessionStore, MemorySessionStore, SessionState, SessionStore};
