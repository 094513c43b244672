//! Core library for Eva, the scripted sleep-course assistant.
//!
//! Eva talks to the user by walking a graph of scripted steps. Each step is
//! one assistant message; branch steps offer their successors as buttons and
//! the chosen label decides where the conversation goes. Once a script runs
//! out, free text gets canned keyword replies.
//!
//! # Layers
//!
//! - [`models`]: scripts, steps, messages and the graph queries over them
//! - [`engine`]: the synchronous dialogue state machine ([`DialogueEngine`])
//! - [`session`]: an actor task adding typing and response delays on top of
//!   the engine ([`SessionHandle`])
//! - [`store`] and [`db`]: persistence behind the [`DialogueStore`] trait,
//!   in memory or in SQLite
//! - [`display`]: markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use eva_core::{MemoryStore, SessionBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionBuilder::new()
//!     .with_typing_delay(Duration::ZERO)
//!     .with_response_delay(Duration::ZERO)
//!     .build_with_store(MemoryStore::new());
//!
//! let snapshot = session.settled().await?;
//! for message in &snapshot.messages {
//!     println!("{message}");
//! }
//!
//! if let Some(choice) = snapshot.buttons.first() {
//!     session.send(choice.clone()).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod message_log;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{Buttons, LocalTime, Messages, OperationStatus};
pub use engine::{Continuation, DialogueEngine, Turn};
pub use error::{DialogueError, Result};
pub use message_log::MessageLog;
pub use models::{Message, Mood, Script, ScriptState, Step, StepKind, StepState};
pub use session::{
    builder::SessionBuilder, SessionEvent, SessionHandle, SessionSnapshot, SessionTiming,
};
pub use store::{DialogueStore, MemoryStore};
