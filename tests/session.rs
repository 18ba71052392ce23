//! Session integration tests
//!
//! Drives the turn loop with a mock chat provider.

use std::sync::Arc;

use async_trait::async_trait;
use doppel::context::{PersonaContext, TurnRole};
use doppel::llm::ChatProvider;
use doppel::prompt::ChatMessage;
use doppel::session::Session;
use doppel::transcript::TranscriptParser;
use doppel::{Error, Result};
use tokio::sync::Mutex;

const EXPORT: &str = "\
23/01/01, 10:01 am - Alice: Hey Bob!
23/01/01, 10:02 am - Bob: Hi Alice!
23/01/01, 10:03 am - Alice: lol totally, we should hang out soon
23/01/01, 10:04 am - Alice: Sounds good, ttyl!
";

/// Mock provider that replies with canned text and records requests
struct MockProvider {
    reply: &'static str,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockProvider {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.lock().await.push(messages.to_vec());
        Ok(self.reply.to_string())
    }
}

/// Mock provider that always fails
struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        Err(Error::Llm("connection refused".to_string()))
    }
}

fn build_context(window_turns: usize) -> PersonaContext {
    let messages = TranscriptParser::new().parse(EXPORT).unwrap();
    PersonaContext::build(&messages, "Alice", 15, window_turns).unwrap()
}

#[tokio::test]
async fn respond_records_user_and_persona_pair() {
    let mut session = Session::new(build_context(20), MockProvider::new("not much!"));

    let reply = session.respond("what's up?").await.unwrap();
    assert_eq!(reply, "not much!");

    let snapshot = session.context().current_context();
    assert_eq!(snapshot.window.len(), 2);
    let turns: Vec<(TurnRole, &str)> = snapshot
        .window
        .iter()
        .map(|t| (t.role, t.text.as_str()))
        .collect();
    assert_eq!(
        turns,
        vec![(TurnRole::User, "what's up?"), (TurnRole::Persona, "not much!")]
    );
}

#[tokio::test]
async fn request_carries_system_prompt_and_history() {
    let provider = MockProvider::new("haha yes");
    let requests = Arc::clone(&provider.requests);
    let mut session = Session::new(build_context(20), provider);

    session.respond("first message").await.unwrap();
    session.respond("second message").await.unwrap();

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 2);

    // Second request: system + recorded pair + current user message
    let second = &requests[1];
    assert_eq!(second[0].role, "system");
    assert!(second[0].content.contains("You are Alice."));
    assert!(second[0].content.contains("lol totally"));
    assert_eq!(second[1].content, "first message");
    assert_eq!(second[2].role, "assistant");
    assert_eq!(second.last().unwrap().content, "second message");
}

#[tokio::test]
async fn window_trims_oldest_pairs_across_turns() {
    let mut session = Session::new(build_context(4), MockProvider::new("ok"));

    for i in 0..5 {
        session.respond(&format!("message {i}")).await.unwrap();
    }

    let snapshot = session.context().current_context();
    assert_eq!(snapshot.window.len(), 4);

    // Only the two most recent pairs remain
    let texts: Vec<&str> = snapshot.window.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["message 3", "ok", "message 4", "ok"]);
}

#[tokio::test]
async fn failed_completion_leaves_window_untouched() {
    let mut session = Session::new(build_context(20), FailingProvider);

    let err = session.respond("hello?").await.unwrap_err();
    assert!(matches!(err, Error::Llm(_)));
    assert!(session.context().current_context().window.is_empty());
}

#[tokio::test]
async fn blank_input_is_rejected_before_the_provider_runs() {
    let provider = MockProvider::new("never sent");
    let requests = Arc::clone(&provider.requests);
    let mut session = Session::new(build_context(20), provider);

    let err = session.respond("   ").await.unwrap_err();
    assert!(matches!(err, Error::EmptyTurn));
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn empty_reply_is_an_error_and_not_recorded() {
    let mut session = Session::new(build_context(20), MockProvider::new("  "));

    let err = session.respond("hello").await.unwrap_err();
    assert!(matches!(err, Error::Llm(_)));
    assert!(session.context().current_context().window.is_empty());
}
