//! Export line grammars and system-notice filters

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Header pattern for `WhatsApp` text exports
///
/// Matches `23/01/05, 10:32 am - Alice: hey` with either a 12h stamp
/// (optional dots in `a.m.`/`p.m.`) or a 24h stamp. The sender group
/// excludes colons so dated system lines without a sender
/// (`... - Messages and calls are end-to-end encrypted ...`) fall through.
static WHATSAPP_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d{2}/\d{2}/\d{2,4}, \d{1,2}:\d{2}\s*(?:[ap]\.?m\.?)?)\s*-\s*([^:]+):\s*(.*)$",
    )
    .expect("valid regex")
});

/// System-notice phrases found in `WhatsApp` exports
static WHATSAPP_NOTICES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Messages and calls are end-to-end encrypted",
        r"is a contact",
        r"created group",
        r"added",
        r"left",
        r"changed this group's icon",
        r"changed the subject",
        r"You're now an admin",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Placeholder bodies the export emits for non-text content
const PLACEHOLDER_BODIES: &[&str] = &["null", "<media omitted>"];

/// Marker appended to messages that were edited after sending
const EDITED_MARKER: &str = "<This message was edited>";

/// Recognizes message-start lines and splits them into sender and body
///
/// A grammar is a single regex with three capture groups: timestamp,
/// sender, and the start of the body.
#[derive(Debug, Clone)]
pub struct HeaderGrammar {
    pattern: Regex,
}

impl HeaderGrammar {
    /// The built-in `WhatsApp` text-export grammar
    #[must_use]
    pub fn whatsapp() -> Self {
        Self {
            pattern: WHATSAPP_HEADER.clone(),
        }
    }

    /// Build a grammar from a custom header pattern
    ///
    /// The pattern must expose three capture groups: timestamp, sender, body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the pattern is not a valid regex or does
    /// not have the expected capture groups.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("invalid header pattern: {e}")))?;
        if pattern.captures_len() < 4 {
            return Err(Error::Config(
                "header pattern needs timestamp, sender, and body capture groups".to_string(),
            ));
        }
        Ok(Self { pattern })
    }

    /// Split a message-start line into `(sender, body_start)`
    ///
    /// Returns `None` when the line does not start a message.
    #[must_use]
    pub fn split(&self, line: &str) -> Option<(String, String)> {
        let caps = self.pattern.captures(line)?;
        let sender = caps.get(2)?.as_str().trim();
        let body = caps.get(3).map_or("", |m| m.as_str()).trim();
        if sender.is_empty() {
            return None;
        }
        Some((sender.to_string(), body.to_string()))
    }
}

/// Recognizes system/meta notices that are not authored content
#[derive(Debug, Clone)]
pub struct NoticeFilter {
    patterns: Vec<Regex>,
}

impl NoticeFilter {
    /// The built-in `WhatsApp` notice set (membership changes, encryption
    /// notice, group metadata edits)
    #[must_use]
    pub fn whatsapp() -> Self {
        Self {
            patterns: WHATSAPP_NOTICES.clone(),
        }
    }

    /// Build a filter from custom notice patterns
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any pattern is not a valid regex.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref())
                    .map_err(|e| Error::Config(format!("invalid notice pattern: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Check whether text matches any configured notice pattern
    #[must_use]
    pub fn is_notice(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// Check whether a finalized body is a non-text placeholder
    #[must_use]
    pub fn is_placeholder(&self, body: &str) -> bool {
        let lower = body.to_lowercase();
        PLACEHOLDER_BODIES.contains(&lower.as_str())
    }

    /// Strip the edited-message marker from a body
    #[must_use]
    pub fn strip_markers(&self, body: &str) -> String {
        body.replace(EDITED_MARKER, "").trim().to_string()
    }
}
