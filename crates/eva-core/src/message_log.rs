//! Append-only chat history.
//!
//! The log is the in-memory record of every exchanged message. Ids are
//! assigned here as `max existing id + 1`, so the log stays authoritative even
//! when the store rejects a write.

use jiff::Timestamp;

use crate::models::Message;

/// Ordered, append-only record of exchanged messages.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from stored messages, restoring chronological order.
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        messages.sort_by(Message::chronological);
        Self { messages }
    }

    /// Id the next appended message will receive.
    pub fn next_id(&self) -> u64 {
        self.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    /// Append a message stamped with the current time.
    pub fn append(&mut self, body: impl Into<String>, is_from_user: bool) -> &Message {
        self.append_at(body, is_from_user, Timestamp::now())
    }

    /// Append a message with an explicit timestamp.
    pub fn append_at(
        &mut self,
        body: impl Into<String>,
        is_from_user: bool,
        date: Timestamp,
    ) -> &Message {
        let message = Message::new(self.next_id(), body, is_from_user, date);
        // keep chronological order when the clock steps backwards
        let position = self
            .messages
            .partition_point(|m| Message::chronological(m, &message).is_le());
        self.messages.insert(position, message);
        &self.messages[position]
    }

    /// Messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message was exchanged yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
