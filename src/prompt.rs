//! Model-facing prompt assembly
//!
//! Turns a [`ContextSnapshot`] into the chat-completions message list: a
//! system message carrying the persona instructions and style exemplars,
//! followed by the window turns and the current user message.

use serde::Serialize;

use crate::context::{ContextSnapshot, TurnRole};

/// Counterpart placeholder when the transcript had no other sender
pub const FALLBACK_COUNTERPART: &str = "your friend";

/// One wire-format chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Build a message with the given role
    #[must_use]
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Render the persona-priming system prompt
#[must_use]
pub fn build_system_prompt(snapshot: &ContextSnapshot) -> String {
    let persona = snapshot.persona_name;
    let counterpart = snapshot.counterpart.unwrap_or(FALLBACK_COUNTERPART);

    let mut prompt = format!(
        "You are {persona}. You are talking to {counterpart}. \
         Your goal is to impersonate {persona} as accurately as possible, \
         mimicking their texting style, tone, common phrases, emoji usage, \
         and typical response length based on the following examples of \
         their past messages. Do not explicitly state you are an AI or a \
         clone. Respond naturally as if you are {persona}.\n\n\
         Here are some examples of how {persona} texts:\n"
    );

    for exemplar in snapshot.exemplars {
        prompt.push_str(&format!("- \"{}\"\n", exemplar.body));
    }

    prompt.push_str(&format!(
        "\nOnly output {persona}'s response. Do not add any prefixes like \"{persona}: \"."
    ));

    prompt
}

/// Assemble the full message list for one completion request
///
/// Order: system prompt, window turns oldest first (user turns as `user`,
/// persona turns as `assistant`), then the current user message.
#[must_use]
pub fn to_chat_messages(snapshot: &ContextSnapshot, user_message: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new("system", build_system_prompt(snapshot))];

    for turn in snapshot.window {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Persona => "assistant",
        };
        messages.push(ChatMessage::new(role, turn.text.clone()));
    }

    messages.push(ChatMessage::new("user", user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PersonaContext;
    use crate::transcript::TranscriptParser;

    fn context() -> PersonaContext {
        let raw = "\
23/01/01, 10:01 am - Alice: Hey Bob!
23/01/01, 10:02 am - Bob: Hi Alice!
23/01/01, 10:03 am - Alice: lol totally
";
        let messages = TranscriptParser::new().parse(raw).unwrap();
        PersonaContext::build(&messages, "Alice", 5, 4).unwrap()
    }

    #[test]
    fn system_prompt_names_both_participants() {
        let ctx = context();
        let prompt = build_system_prompt(&ctx.current_context());
        assert!(prompt.contains("You are Alice."));
        assert!(prompt.contains("talking to Bob"));
        assert!(prompt.contains("- \"Hey Bob!\""));
        assert!(prompt.contains("- \"lol totally\""));
    }

    #[test]
    fn missing_counterpart_falls_back() {
        let raw = "23/01/01, 10:01 am - Alice: solo\n";
        let messages = TranscriptParser::new().parse(raw).unwrap();
        let ctx = PersonaContext::build(&messages, "Alice", 5, 4).unwrap();

        let prompt = build_system_prompt(&ctx.current_context());
        assert!(prompt.contains("talking to your friend"));
    }

    #[test]
    fn messages_follow_system_window_user_order() {
        let mut ctx = context();
        ctx.record_turn(TurnRole::User, "what's up?").unwrap();
        ctx.record_turn(TurnRole::Persona, "not much!").unwrap();

        let messages = to_chat_messages(&ctx.current_context(), "pizza later?");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages.last().unwrap().content, "pizza later?");
    }

    #[test]
    fn empty_window_yields_system_plus_user() {
        let ctx = context();
        let messages = to_chat_messages(&ctx.current_context(), "hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }
}
