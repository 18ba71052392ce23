//! Error types for doppel

use thiserror::Error;

/// Result type alias for doppel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in doppel
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transcript yielded no recognizable messages
    #[error("transcript contains no recognizable messages")]
    EmptyTranscript,

    /// Persona name matched no sender in the transcript
    #[error("persona not found: {name}; transcript senders: {available:?}")]
    PersonaNotFound {
        /// The name that was looked up
        name: String,
        /// Distinct sender names present in the transcript, first-seen order
        available: Vec<String>,
    },

    /// A conversation turn was recorded with empty text
    #[error("turn text must not be empty")]
    EmptyTurn,

    /// Chat completion error
    #[error("llm error: {0}")]
    Llm(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
