//! Configuration for doppel sessions
//!
//! The API key comes from the environment; everything else defaults here
//! and is overridden by CLI flags (which carry their own env fallbacks).
//! Nothing is persisted between runs.

use secrecy::SecretString;

use crate::llm::DEFAULT_MODEL;
use crate::{Error, Result};

/// Default cap on style exemplars included in the prompt
pub const DEFAULT_MAX_EXEMPLARS: usize = 15;

/// Default conversation window bound, in turns (ten user/persona pairs)
pub const DEFAULT_WINDOW_TURNS: usize = 20;

/// Runtime configuration for one chat session
#[derive(Debug)]
pub struct Config {
    /// Chat model identifier
    pub model: String,

    /// Maximum style exemplars in the system prompt
    pub max_exemplars: usize,

    /// Maximum turns retained in the conversation window
    pub max_window_turns: usize,

    /// Groq API key (from `GROQ_API_KEY`)
    pub api_key: SecretString,
}

impl Config {
    /// Load configuration from the environment with defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `GROQ_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| {
                Error::Config(
                    "GROQ_API_KEY is not set; export it or add it to your shell profile"
                        .to_string(),
                )
            })?;

        Ok(Self {
            model: DEFAULT_MODEL.to_string(),
            max_exemplars: DEFAULT_MAX_EXEMPLARS,
            max_window_turns: DEFAULT_WINDOW_TURNS,
            api_key,
        })
    }
}
