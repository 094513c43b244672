//! Database operations and SQLite management for scripts and messages.
//!
//! This module provides the SQLite implementation of
//! [`DialogueStore`](crate::store::DialogueStore). It handles connections,
//! schema management and the query modules for scripts and messages.

use std::path::Path;

use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, DialogueError, Result},
    models::{Message, Script, ScriptId, ScriptState, StepId},
    store::DialogueStore,
};

pub mod message_queries;
pub mod schema;
pub mod script_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Creates a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens the database at `path`, recreating the file once when the
    /// existing one cannot be opened or initialized.
    pub fn open_or_recreate<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Self::new(path) {
            Ok(db) => Ok(db),
            Err(err @ DialogueError::Database { .. }) if path.exists() => {
                log::warn!(
                    "Failed to load database at {}: {err}; recreating it",
                    path.display()
                );
                std::fs::remove_file(path).map_err(|source| DialogueError::FileSystem {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::new(path)
            }
            Err(err) => Err(err),
        }
    }
}

impl DialogueStore for Database {
    fn load_scripts(&self) -> Result<Vec<Script>> {
        self.get_scripts()
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        self.get_messages()
    }

    fn insert_script(&mut self, script: &Script) -> Result<()> {
        self.save_script(script)
    }

    fn append_message(&mut self, message: &Message) -> Result<()> {
        self.save_message(message)
    }

    fn advance_step(&mut self, script_id: ScriptId, step_id: StepId) -> Result<()> {
        self.mark_step_done(script_id, step_id)
    }

    fn record_answer(&mut self, script_id: ScriptId, step_id: StepId, answer: &str) -> Result<()> {
        self.save_answer(script_id, step_id, answer)
    }

    fn update_script(
        &mut self,
        script_id: ScriptId,
        state: ScriptState,
        current_step_id: Option<StepId>,
    ) -> Result<()> {
        self.update_script_state(script_id, state, current_step_id)
    }

    fn reset_session(&mut self) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute("DELETE FROM messages", [])
            .db_context("Failed to delete messages")?;
        tx.execute("DELETE FROM scripts", [])
            .db_context("Failed to delete scripts")?;
        tx.commit().db_context("Failed to commit transaction")
    }
}
