//! Interactive chat session driver
//!
//! Owns the [`PersonaContext`] and the inference provider for one session.
//! Turns are processed strictly sequentially: read input, complete, record
//! the user/persona pair, print.

use dialoguer::Input;

use crate::context::{PersonaContext, TurnRole};
use crate::llm::ChatProvider;
use crate::prompt::{self, FALLBACK_COUNTERPART};
use crate::{Error, Result};

/// One live chat session with a cloned persona
pub struct Session<P> {
    context: PersonaContext,
    provider: P,
}

impl<P: ChatProvider> Session<P> {
    /// Create a session over a built context and provider
    #[must_use]
    pub const fn new(context: PersonaContext, provider: P) -> Self {
        Self { context, provider }
    }

    /// Process one user utterance and return the persona's reply
    ///
    /// The user turn and the reply are recorded as a pair only after the
    /// provider succeeds, so a failed completion leaves the window
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTurn`] for blank input and [`Error::Llm`] when
    /// the provider fails or produces an empty reply.
    pub async fn respond(&mut self, user_input: &str) -> Result<String> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(Error::EmptyTurn);
        }

        let messages = prompt::to_chat_messages(&self.context.current_context(), user_input);
        let reply = self.provider.complete(&messages).await?;
        if reply.trim().is_empty() {
            return Err(Error::Llm("provider returned an empty reply".to_string()));
        }

        self.context.record_turn(TurnRole::User, user_input)?;
        self.context.record_turn(TurnRole::Persona, &reply)?;
        Ok(reply)
    }

    /// Run the interactive terminal loop until the user quits
    ///
    /// # Errors
    ///
    /// Returns error when reading terminal input fails.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let persona = self.context.persona_name().to_string();
        let counterpart = self
            .context
            .counterpart()
            .unwrap_or(FALLBACK_COUNTERPART)
            .to_string();

        println!("\nYou are now chatting with a clone of {persona}.");
        println!("The persona is based on their chat history with {counterpart}.");
        println!("Type 'quit' or 'exit' to end the chat.\n");

        loop {
            let input: String = Input::new()
                .with_prompt(format!("{counterpart} (you)"))
                .allow_empty(true)
                .interact_text()?;

            let line = input.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                println!("Goodbye!");
                return Ok(());
            }
            if line.is_empty() {
                continue;
            }

            match self.respond(line).await {
                Ok(reply) => println!("{persona}: {reply}"),
                Err(e) => {
                    tracing::warn!(error = %e, "completion failed");
                    println!("{persona}: sorry, I can't come up with a reply right now ({e})");
                }
            }
        }
    }

    /// The session's persona context
    #[must_use]
    pub const fn context(&self) -> &PersonaContext {
        &self.context
    }
}
