//! Integration test binary -- all integration tests consolidated into a single
//! binary.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

mod cli_shutdown;
mod config_roundtrip;
mod confirmation_flow;
mod dialogue_scenarios;
mod session_persistence;
mod wake_policy;
