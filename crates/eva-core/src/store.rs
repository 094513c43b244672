//! Storage abstraction for scripts and messages.
//!
//! The dialogue engine never talks to a database directly. It persists through
//! [`DialogueStore`], which is implemented by the SQLite [`crate::Database`]
//! and by the in-memory [`MemoryStore`] used in tests.
//!
//! Every write is expected to be idempotent: saving the same resulting state
//! twice must be harmless, because the engine treats persistence as
//! best-effort and may repeat a write after a failure.

use crate::{
    error::Result,
    models::{Message, Script, ScriptId, ScriptState, StepId},
};

mod memory;

pub use memory::MemoryStore;

/// Repository of dialogue state.
pub trait DialogueStore {
    /// Load every script with its steps.
    fn load_scripts(&self) -> Result<Vec<Script>>;

    /// Load every message.
    fn load_messages(&self) -> Result<Vec<Message>>;

    /// Insert a script and its steps, replacing any script with the same id.
    fn insert_script(&mut self, script: &Script) -> Result<()>;

    /// Store a message, replacing any message with the same id.
    fn append_message(&mut self, message: &Message) -> Result<()>;

    /// Mark a step done and move the script's cursor to it.
    fn advance_step(&mut self, script_id: ScriptId, step_id: StepId) -> Result<()>;

    /// Store the answer the user gave to a step.
    fn record_answer(&mut self, script_id: ScriptId, step_id: StepId, answer: &str) -> Result<()>;

    /// Update a script's run state and cursor.
    fn update_script(
        &mut self,
        script_id: ScriptId,
        state: ScriptState,
        current_step_id: Option<StepId>,
    ) -> Result<()>;

    /// Delete every message and every script together with its steps.
    fn reset_session(&mut self) -> Result<()>;
}
