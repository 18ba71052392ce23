//! Line-oriented transcript state machine

use super::grammar::{HeaderGrammar, NoticeFilter};
use super::Message;
use crate::{Error, Result};

/// Parses raw chat exports into ordered [`Message`]s
///
/// Each physical line is classified as a message-start (per the configured
/// [`HeaderGrammar`]), a system notice, or a continuation of the message
/// currently being accumulated. Notices terminate the current accumulation;
/// continuations before any message-start are discarded.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    grammar: HeaderGrammar,
    filter: NoticeFilter,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser {
    /// Create a parser for `WhatsApp` text exports
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: HeaderGrammar::whatsapp(),
            filter: NoticeFilter::whatsapp(),
        }
    }

    /// Create a parser with a custom grammar and notice filter
    #[must_use]
    pub const fn with_grammar(grammar: HeaderGrammar, filter: NoticeFilter) -> Self {
        Self { grammar, filter }
    }

    /// Parse raw export text into ordered messages
    ///
    /// Message order follows the original line order of the start lines;
    /// `order_index` is strictly increasing across the returned sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTranscript`] when the input yields zero
    /// messages (empty input or no recognizable message lines).
    pub fn parse(&self, raw_text: &str) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for line in raw_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((sender, body_start)) = self.grammar.split(line) {
                self.finalize(current.take(), &mut messages);
                current = Some((sender, vec![body_start]));
            } else if self.filter.is_notice(line) {
                // Dated system lines carry no sender; they end the current
                // message rather than extending it.
                self.finalize(current.take(), &mut messages);
            } else if let Some((_, lines)) = current.as_mut() {
                lines.push(line.to_string());
            }
        }
        self.finalize(current, &mut messages);

        if messages.is_empty() {
            return Err(Error::EmptyTranscript);
        }

        tracing::debug!(
            messages = messages.len(),
            senders = senders(&messages).len(),
            "parsed transcript"
        );
        Ok(messages)
    }

    /// Emit an accumulated message unless it is filtered out
    fn finalize(&self, current: Option<(String, Vec<String>)>, messages: &mut Vec<Message>) {
        let Some((sender, lines)) = current else {
            return;
        };

        let body = self.filter.strip_markers(lines.join("\n").trim());
        if body.is_empty() || self.filter.is_placeholder(&body) || self.filter.is_notice(&body) {
            return;
        }

        messages.push(Message {
            sender,
            body,
            order_index: messages.len(),
        });
    }
}

/// Distinct sender names in first-encountered order
#[must_use]
pub fn senders(messages: &[Message]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for msg in messages {
        if !seen.contains(&msg.sender.as_str()) {
            seen.push(&msg.sender);
        }
    }
    seen
}

/// Identify the persona's counterpart in the transcript
///
/// The counterpart is the sole non-persona sender when there is exactly one,
/// otherwise the most frequent non-persona sender. Frequency ties are broken
/// by first encounter order. Returns `None` when the persona is the only
/// sender.
#[must_use]
pub fn counterpart<'a>(messages: &'a [Message], persona_name: &str) -> Option<&'a str> {
    // (name, message count) in first-encountered order
    let mut tallies: Vec<(&str, usize)> = Vec::new();
    for msg in messages {
        if msg.sender == persona_name {
            continue;
        }
        match tallies.iter_mut().find(|(name, _)| *name == msg.sender) {
            Some((_, count)) => *count += 1,
            None => tallies.push((&msg.sender, 1)),
        }
    }

    let best = tallies.iter().map(|(_, count)| *count).max()?;
    tallies
        .iter()
        .find(|(_, count)| *count == best)
        .map(|(name, _)| *name)
}
