//! Error types for the riva assistant.

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum RivaError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// Session record could not be read or written.
    #[error("session error: {0}")]
    Session(String),

    /// A host action could not be started.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Speech output failed.
    #[error("speech error: {0}")]
    Speech(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, RivaError>;
