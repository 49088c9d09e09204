use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in a conversation.
///
/// Turns are immutable once appended to a transcript. Assistant turns may
/// carry citations; an error reply is an ordinary assistant turn whose text
/// describes the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    /// Supporting-material labels; omitted entirely when the service cited
    /// nothing, never an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,
    pub timestamp: DateTime<Local>,
}

impl Turn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            citations: None,
            timestamp: Local::now(),
        }
    }

    /// Create an assistant turn, dropping an empty citation list
    pub fn assistant(text: impl Into<String>, citations: Vec<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            citations: if citations.is_empty() {
                None
            } else {
                Some(citations)
            },
            timestamp: Local::now(),
        }
    }
}

/// Ordered history of turns for one session.
///
/// Append-only: insertion order is chronological order is display order,
/// and nothing is reordered or removed for the life of the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
