//! Error types for the dialogue library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all dialogue operations.
#[derive(Error, Debug)]
pub enum DialogueError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The auto-advance chain revisited a step or ran past its budget
    #[error("Auto-advance from step {step_id} exceeded {limit} steps without user input")]
    AutoAdvanceLoop { step_id: u64, limit: usize },
    /// The session task is no longer running
    #[error("Session is closed")]
    SessionClosed,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> DialogueError {
        DialogueError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DialogueError {
        DialogueError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl DialogueError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| DialogueError::database(message).with_source(e))
    }
}

/// Result type alias for dialogue operations
pub type Result<T> = std::result::Result<T, DialogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_builder_keeps_message() {
        let err = DialogueError::database("Failed to insert message")
            .with_source(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), "Database error: Failed to insert message");
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = DialogueError::invalid_input("typing_delay").with_reason("must be finite");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'typing_delay': must be finite"
        );
    }

    #[test]
    fn test_auto_advance_loop_message() {
        let err = DialogueError::AutoAdvanceLoop {
            step_id: 7,
            limit: 3,
        };
        assert!(err.to_string().contains("step 7"));
    }
}
