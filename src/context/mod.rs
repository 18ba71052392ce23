//! Persona context assembly for the live chat session
//!
//! A [`PersonaContext`] owns everything one session needs per model call:
//! the style exemplars picked from the transcript, the counterpart's name,
//! and the bounded window of recent conversation turns. It is built once
//! from the parsed transcript and mutated only by [`PersonaContext::record_turn`].

mod exemplar;
mod window;

pub use exemplar::{EvenStride, ExemplarPolicy, MostRecent};
pub use window::{ConversationWindow, Turn, TurnRole};

use crate::transcript::{self, Message};
use crate::{Error, Result};

/// Session-scoped persona state feeding the inference collaborator
#[derive(Debug, Clone)]
pub struct PersonaContext {
    persona_name: String,
    counterpart: Option<String>,
    exemplars: Vec<Message>,
    window: ConversationWindow,
}

/// Read-only view of the current context, ready for prompt assembly
#[derive(Debug, Clone, Copy)]
pub struct ContextSnapshot<'a> {
    /// Name of the cloned persona
    pub persona_name: &'a str,
    /// The persona's counterpart, if one was identified
    pub counterpart: Option<&'a str>,
    /// Style exemplars in original transcript order
    pub exemplars: &'a [Message],
    /// Live conversation window, oldest turn first
    pub window: &'a ConversationWindow,
}

impl PersonaContext {
    /// Build a context from parsed messages using even-stride exemplars
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersonaNotFound`] when no message sender matches
    /// `persona_name` exactly (case-sensitive).
    pub fn build(
        messages: &[Message],
        persona_name: &str,
        max_exemplars: usize,
        max_window_turns: usize,
    ) -> Result<Self> {
        Self::build_with_policy(
            messages,
            persona_name,
            max_exemplars,
            max_window_turns,
            &EvenStride,
        )
    }

    /// Build a context with an explicit exemplar selection policy
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersonaNotFound`] when no message sender matches
    /// `persona_name` exactly (case-sensitive).
    pub fn build_with_policy(
        messages: &[Message],
        persona_name: &str,
        max_exemplars: usize,
        max_window_turns: usize,
        policy: &dyn ExemplarPolicy,
    ) -> Result<Self> {
        let persona_messages: Vec<&Message> = messages
            .iter()
            .filter(|m| m.sender == persona_name)
            .collect();

        if persona_messages.is_empty() {
            return Err(Error::PersonaNotFound {
                name: persona_name.to_string(),
                available: transcript::senders(messages)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
            });
        }

        let exemplars = policy.select(&persona_messages, max_exemplars);
        let counterpart = transcript::counterpart(messages, persona_name).map(ToString::to_string);

        tracing::info!(
            persona = persona_name,
            counterpart = counterpart.as_deref().unwrap_or("<unknown>"),
            persona_messages = persona_messages.len(),
            exemplars = exemplars.len(),
            "built persona context"
        );

        Ok(Self {
            persona_name: persona_name.to_string(),
            counterpart,
            exemplars,
            window: ConversationWindow::new(max_window_turns),
        })
    }

    /// Record one live conversation turn
    ///
    /// Appends to the window, evicting the oldest turn when the bound would
    /// be exceeded. To keep trimming symmetric, the session driver records
    /// the user turn and the persona's reply as a pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTurn`] when `text` is empty after trimming.
    pub fn record_turn(&mut self, role: TurnRole, text: &str) -> Result<()> {
        self.window.push(role, text)
    }

    /// Current exemplars, counterpart, and window, in turn order
    ///
    /// Pure read; may be called any number of times per turn.
    #[must_use]
    pub fn current_context(&self) -> ContextSnapshot<'_> {
        ContextSnapshot {
            persona_name: &self.persona_name,
            counterpart: self.counterpart.as_deref(),
            exemplars: &self.exemplars,
            window: &self.window,
        }
    }

    /// Name of the cloned persona
    #[must_use]
    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    /// The identified counterpart, if any
    #[must_use]
    pub fn counterpart(&self) -> Option<&str> {
        self.counterpart.as_deref()
    }
}
