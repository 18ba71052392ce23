//! Style-exemplar selection policies
//!
//! Which persona messages count as style examples was never precisely
//! pinned down beyond a cap, so selection is a replaceable policy rather
//! than a fixed rule.

use crate::transcript::Message;

/// Strategy for picking style exemplars from the persona's messages
///
/// Implementations must be deterministic and preserve the messages'
/// original relative order.
pub trait ExemplarPolicy {
    /// Select at most `max` exemplars from the persona's messages
    fn select(&self, persona_messages: &[&Message], max: usize) -> Vec<Message>;
}

/// Even-stride sampling across the whole transcript
///
/// Takes every message when the cap is not exceeded, otherwise samples at a
/// fixed stride so exemplars reflect style drift over the entire history
/// rather than only its beginning or end.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenStride;

impl ExemplarPolicy for EvenStride {
    fn select(&self, persona_messages: &[&Message], max: usize) -> Vec<Message> {
        let count = persona_messages.len();
        if count <= max {
            return persona_messages.iter().map(|m| (*m).clone()).collect();
        }

        // Floor-divided stride positions are strictly increasing for
        // max <= count, so no message is picked twice.
        (0..max)
            .map(|i| persona_messages[i * count / max].clone())
            .collect()
    }
}

/// Most-recent-first selection, kept in original order
///
/// Mirrors exports where the latest messages best match the persona's
/// current voice.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRecent;

impl ExemplarPolicy for MostRecent {
    fn select(&self, persona_messages: &[&Message], max: usize) -> Vec<Message> {
        let skip = persona_messages.len().saturating_sub(max);
        persona_messages[skip..].iter().map(|m| (*m).clone()).collect()
    }
}
