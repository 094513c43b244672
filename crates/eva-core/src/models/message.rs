//! Chat message model.

use std::cmp::Ordering;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Author name stored on user messages.
pub const USER_AUTHOR: &str = "User";

/// Author name stored on assistant messages.
pub const ASSISTANT_AUTHOR: &str = "Eva";

/// One exchanged chat line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique, monotonically increasing identifier
    pub id: u64,

    /// Text of the message
    pub body: String,

    /// Display name of the author
    pub author_name: String,

    /// Creation time (UTC)
    pub date: Timestamp,

    /// Whether the user wrote the message
    pub is_from_user: bool,
}

impl Message {
    /// Create a message, deriving the author name from the role.
    pub fn new(id: u64, body: impl Into<String>, is_from_user: bool, date: Timestamp) -> Self {
        Self {
            id,
            body: body.into(),
            author_name: if is_from_user {
                USER_AUTHOR
            } else {
                ASSISTANT_AUTHOR
            }
            .to_string(),
            date,
            is_from_user,
        }
    }

    /// Chronological order: by date, ties broken by id.
    pub fn chronological(a: &Message, b: &Message) -> Ordering {
        a.date.cmp(&b.date).then(a.id.cmp(&b.id))
    }
}
