//! Builder for creating and configuring sessions.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::task;

use super::{SessionHandle, SessionTiming};
use crate::{
    db::Database,
    engine::{DialogueEngine, DEFAULT_MAX_AUTO_ADVANCE},
    error::{DialogueError, Result},
    store::DialogueStore,
};

/// Builder for creating and configuring sessions.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    database_path: Option<PathBuf>,
    timing: SessionTiming,
    max_auto_advance: usize,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            timing: SessionTiming::default(),
            max_auto_advance: DEFAULT_MAX_AUTO_ADVANCE,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/eva/eva.db` or `~/.local/share/eva/eva.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Delay before Eva starts typing a message.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.timing.typing_delay = delay;
        self
    }

    /// Delay between the typing indicator and the message.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.timing.response_delay = delay;
        self
    }

    /// Maximum consecutive auto-advance hops without user input.
    pub fn with_max_auto_advance(mut self, limit: usize) -> Self {
        self.max_auto_advance = limit;
        self
    }

    /// Resolved database path: the configured one, else the XDG default.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }

    /// Opens the SQLite store and starts the session on it.
    ///
    /// # Errors
    ///
    /// Returns `DialogueError::FileSystem` if the database directory cannot be created
    /// Returns `DialogueError::Database` if database initialization fails
    pub async fn build(self) -> Result<SessionHandle> {
        let db_path = self.database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DialogueError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db = task::spawn_blocking(move || Database::open_or_recreate(&db_path))
            .await
            .map_err(|e| DialogueError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        Ok(self.build_with_store(db))
    }

    /// Starts the session on the given store. Must be called from within a
    /// tokio runtime.
    pub fn build_with_store<S>(self, store: S) -> SessionHandle
    where
        S: DialogueStore + Send + 'static,
    {
        let engine = DialogueEngine::new(store).with_max_auto_advance(self.max_auto_advance);
        SessionHandle::spawn(engine, self.timing)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("eva")
            .place_data_file("eva.db")
            .map_err(|e| DialogueError::XdgDirectory(e.to_string()))
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
