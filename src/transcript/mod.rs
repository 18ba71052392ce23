//! Transcript parsing: structured messages from raw chat exports
//!
//! The parser turns the unstructured multi-line text of an exported chat
//! into an ordered sequence of per-sender [`Message`]s. The header line
//! grammar is the one piece that varies between export sources, so it is
//! injected as a [`HeaderGrammar`] rather than hard-coded.

mod grammar;
mod parser;

pub use grammar::{HeaderGrammar, NoticeFilter};
pub use parser::{TranscriptParser, counterpart, senders};

/// One parsed utterance from the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender name, verbatim as it appears in the export (case-sensitive)
    pub sender: String,

    /// Utterance text; continuation lines joined by newlines, outer-trimmed
    pub body: String,

    /// Position in the transcript; strictly increasing, defines order
    pub order_index: usize,
}
