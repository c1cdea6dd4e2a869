//! Append-only message log with a single optimistic in-flight turn.

use chrono::{DateTime, Utc};
use shared::domain::Role;

use crate::error::ClientError;

pub const FALLBACK_REPLY: &str =
    "Sorry, I lost my connection to the database. Is the API server running?";

/// Delivery state of a user message. Assistant messages carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Provisional,
    Answered,
    Unanswered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sequence: u64,
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub delivery: Option<Delivery>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(u64);

/// Handle for the provisional user message of the turn currently awaiting a reply.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTurn {
    id: TurnId,
    query: String,
}

impl PendingTurn {
    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Default)]
pub struct ConversationSession {
    messages: Vec<Message>,
    next_sequence: u64,
    pending: Option<TurnId>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting(greeting: &str) -> Self {
        let mut session = Self::new();
        if !greeting.trim().is_empty() {
            session.push(Role::Assistant, greeting.to_string(), None);
        }
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends the user's query provisionally and marks the session pending.
    pub fn begin(&mut self, text: &str) -> Result<PendingTurn, ClientError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        if self.pending.is_some() {
            return Err(ClientError::ChatPending);
        }

        let id = TurnId(self.push(
            Role::User,
            query.to_string(),
            Some(Delivery::Provisional),
        ));
        self.pending = Some(id);
        Ok(PendingTurn {
            id,
            query: query.to_string(),
        })
    }

    /// Resolves the pending turn with the backend's reply. Returns false for a
    /// turn that is not the pending one.
    pub fn finalize(&mut self, turn: TurnId, reply: impl Into<String>) -> bool {
        self.resolve(turn, Delivery::Answered, reply.into())
    }

    /// Resolves the pending turn with a fallback reply after a failed request.
    pub fn fail(&mut self, turn: TurnId, fallback: impl Into<String>) -> bool {
        self.resolve(turn, Delivery::Unanswered, fallback.into())
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> u64 {
        self.push(Role::Assistant, content.into(), None)
    }

    fn resolve(&mut self, turn: TurnId, delivery: Delivery, reply: String) -> bool {
        if self.pending != Some(turn) {
            return false;
        }
        self.pending = None;

        if let Ok(idx) = self
            .messages
            .binary_search_by_key(&turn.0, |message| message.sequence)
        {
            self.messages[idx].delivery = Some(delivery);
        }
        self.push(Role::Assistant, reply, None);
        true
    }

    fn push(&mut self, role: Role, content: String, delivery: Option<Delivery>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.messages.push(Message {
            sequence,
            role,
            content,
            sent_at: Utc::now(),
            delivery,
        });
        sequence
    }
}

#[cfg(test)]
#[path = "tests/conversation_tests.rs"]
mod tests;
