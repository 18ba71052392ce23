//! Doppel - chat with a clone of a friend
//!
//! Rebuilds a person's conversational voice from an exported chat
//! transcript and uses it to prime an LLM-backed session:
//! - Transcript parsing (structured per-sender messages from raw exports)
//! - Persona context (style exemplars + bounded conversation window)
//! - Prompt assembly and chat-completions client
//! - Interactive terminal session loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        exported transcript (text file)        │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │   TranscriptParser  →  PersonaContext         │
//! │   (messages)           (exemplars, window)    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │   prompt assembly  →  chat completions API    │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod transcript;

pub use config::Config;
pub use context::{ContextSnapshot, ConversationWindow, PersonaContext, Turn, TurnRole};
pub use error::{Error, Result};
pub use llm::{ChatProvider, GroqClient};
pub use prompt::ChatMessage;
pub use session::Session;
pub use transcript::{HeaderGrammar, Message, NoticeFilter, TranscriptParser};
