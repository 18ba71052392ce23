//! Bounded sliding window over live conversation turns

use std::collections::VecDeque;

use crate::{Error, Result};

/// Who spoke a turn in the live session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// The human chatting with the clone
    User,
    /// The cloned persona
    Persona,
}

impl TurnRole {
    /// Display name for logs and prompt formatting
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Persona => "persona",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One utterance in the live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Speaker of this turn
    pub role: TurnRole,
    /// Utterance content, never empty
    pub text: String,
    /// Monotonically increasing position within the session
    pub turn_index: u64,
}

/// FIFO-bounded sequence of [`Turn`]s
///
/// Holds at most `max_turns` entries; appending beyond the bound evicts the
/// oldest turn. Turns are append-only and never mutated after creation.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    turns: VecDeque<Turn>,
    max_turns: usize,
    next_index: u64,
}

impl ConversationWindow {
    /// Create an empty window bounded by `max_turns`
    #[must_use]
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns),
            max_turns,
            next_index: 0,
        }
    }

    /// Append a turn, evicting the oldest when the bound is exceeded
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTurn`] when `text` is empty after trimming.
    pub fn push(&mut self, role: TurnRole, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::EmptyTurn);
        }

        self.turns.push_back(Turn {
            role,
            text: text.to_string(),
            turn_index: self.next_index,
        });
        self.next_index += 1;

        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
        Ok(())
    }

    /// Current turns, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of retained turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the window holds no turns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Configured maximum number of turns
    #[must_use]
    pub const fn max_turns(&self) -> usize {
        self.max_turns
    }
}

impl<'a> IntoIterator for &'a ConversationWindow {
    type Item = &'a Turn;
    type IntoIter = std::collections::vec_deque::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_never_exceeds_bound() {
        let mut window = ConversationWindow::new(4);
        for i in 0..6 {
            let role = if i % 2 == 0 { TurnRole::User } else { TurnRole::Persona };
            window.push(role, &format!("turn {i}")).unwrap();
            assert!(window.len() <= 4);
        }
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn eviction_is_strict_fifo() {
        let mut window = ConversationWindow::new(4);
        for i in 0..6 {
            let role = if i % 2 == 0 { TurnRole::User } else { TurnRole::Persona };
            window.push(role, &format!("turn {i}")).unwrap();
        }
        let indices: Vec<u64> = window.iter().map(|t| t.turn_index).collect();
        assert_eq!(indices, vec![2, 3, 4, 5]);
    }

    #[test]
    fn turn_indices_survive_eviction() {
        let mut window = ConversationWindow::new(2);
        for i in 0..5 {
            window.push(TurnRole::User, &format!("t{i}")).unwrap();
        }
        // Indices keep counting even though older turns were evicted
        let indices: Vec<u64> = window.iter().map(|t| t.turn_index).collect();
        assert_eq!(indices, vec![3, 4]);
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut window = ConversationWindow::new(4);
        assert!(matches!(window.push(TurnRole::User, ""), Err(Error::EmptyTurn)));
        assert!(matches!(window.push(TurnRole::User, "   "), Err(Error::EmptyTurn)));
        assert!(window.is_empty());
    }

    #[test]
    fn zero_capacity_window_stays_empty() {
        let mut window = ConversationWindow::new(0);
        window.push(TurnRole::User, "hello").unwrap();
        assert!(window.is_empty());
    }
}
