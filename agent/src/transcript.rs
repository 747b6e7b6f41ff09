//! Conversation transcript.

use serde::{Deserialize, Serialize};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message (instructions).
    System,
    /// User message.
    User,
    /// Assistant message. Retrieved context is also recorded under this role.
    Assistant,
}

/// A single message in the transcript, in chat-completions message shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered, append-only log of turns.
///
/// Index 0 always holds the single system turn. Turns are only ever added
/// at the end, and only from inside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Start a transcript with the given system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the system turn is never removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn system_prompt(&self) -> &str {
        self.turns
            .first()
            .map(|turn| turn.content.as_str())
            .unwrap_or_default()
    }

    /// The current turns followed by `pending`, without committing them.
    pub(crate) fn with_pending(&self, pending: &[Turn]) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(self.turns.len() + pending.len());
        turns.extend_from_slice(&self.turns);
        turns.extend_from_slice(pending);
        turns
    }

    pub(crate) fn extend(&mut self, turns: impl IntoIterator<Item = Turn>) {
        self.turns.extend(
            turns
                .into_iter()
                .filter(|turn| turn.role != Role::System),
        );
    }
}
