//! Message queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    models::Message,
};

const SELECT_MESSAGES_SQL: &str =
    "SELECT id, body, author_name, date, is_from_user FROM messages ORDER BY id";
const UPSERT_MESSAGE_SQL: &str = "INSERT OR REPLACE INTO messages (id, body, author_name, date, is_from_user) VALUES (?1, ?2, ?3, ?4, ?5)";

impl super::Database {
    fn build_message_from_row(row: &rusqlite::Row) -> rusqlite::Result<Message> {
        Ok(Message {
            id: row.get::<_, i64>(0)? as u64,
            body: row.get(1)?,
            author_name: row.get(2)?,
            date: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            is_from_user: row.get(4)?,
        })
    }

    /// Retrieves every message. Chronological ordering is restored by
    /// [`crate::MessageLog`].
    pub fn get_messages(&self) -> Result<Vec<Message>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MESSAGES_SQL)
            .db_context("Failed to prepare messages query")?;
        let messages = stmt
            .query_map([], Self::build_message_from_row)
            .db_context("Failed to query messages")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read message row")?;
        Ok(messages)
    }

    /// Stores a message, replacing a message with the same id.
    pub fn save_message(&mut self, message: &Message) -> Result<()> {
        self.connection
            .execute(
                UPSERT_MESSAGE_SQL,
                params![
                    message.id as i64,
                    &message.body,
                    &message.author_name,
                    message.date.to_string(),
                    message.is_from_user,
                ],
            )
            .db_context("Failed to insert message")?;
        Ok(())
    }
}
