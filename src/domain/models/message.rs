#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

/// A chat entry. Immutable once created, only a `Transcript` hands them out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: i64,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    fn new(id: i64, role: Role, content: &str, timestamp: DateTime<Utc>) -> Message {
        return Message {
            id,
            role,
            content: content.to_string(),
            timestamp,
        };
    }

    pub fn id(&self) -> i64 {
        return self.id;
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        return self.timestamp;
    }
}

/// Append-only, ordered chat log. Order of the underlying vector is
/// authoritative; ids are creation-time milliseconds bumped past the previous
/// entry so they stay unique when two messages land in the same millisecond.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn push(&mut self, role: Role, content: &str) -> &Message {
        return self.push_at(role, content, Utc::now());
    }

    pub fn push_at(&mut self, role: Role, content: &str, now: DateTime<Utc>) -> &Message {
        let mut id = now.timestamp_millis();
        if let Some(last) = self.messages.last() {
            if id <= last.id {
                id = last.id + 1;
            }
        }

        self.messages.push(Message::new(id, role, content, now));
        return &self.messages[self.messages.len() - 1];
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn last(&self) -> Option<&Message> {
        return self.messages.last();
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
