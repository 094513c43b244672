//! In-memory store.

use std::sync::{Arc, Mutex, MutexGuard};

use super::DialogueStore;
use crate::{
    error::{DialogueError, Result},
    models::{Message, Script, ScriptId, ScriptState, StepId, StepState},
};

#[derive(Debug, Default)]
struct Inner {
    scripts: Vec<Script>,
    messages: Vec<Message>,
    fail_writes: bool,
    writes: usize,
}

/// Store keeping everything in memory.
///
/// Clones share the same data, so a test can hand one clone to a session and
/// inspect the other. Writes can be switched to fail to exercise best-effort
/// persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Snapshot of the stored scripts.
    pub fn scripts(&self) -> Vec<Script> {
        self.lock().scripts.clone()
    }

    /// Snapshot of the stored messages.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a poisoned lock still holds consistent data for tests
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write<T>(&self, op: impl FnOnce(&mut Inner) -> T) -> Result<T> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(DialogueError::Configuration {
                message: "memory store is read-only".to_string(),
            });
        }
        inner.writes += 1;
        Ok(op(&mut inner))
    }
}

impl DialogueStore for MemoryStore {
    fn load_scripts(&self) -> Result<Vec<Script>> {
        Ok(self.scripts())
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        Ok(self.messages())
    }

    fn insert_script(&mut self, script: &Script) -> Result<()> {
        self.write(|inner| {
            inner.scripts.retain(|s| s.id != script.id);
            inner.scripts.push(script.clone());
        })
    }

    fn append_message(&mut self, message: &Message) -> Result<()> {
        self.write(|inner| {
            inner.messages.retain(|m| m.id != message.id);
            inner.messages.push(message.clone());
        })
    }

    fn advance_step(&mut self, script_id: ScriptId, step_id: StepId) -> Result<()> {
        self.write(|inner| {
            if let Some(script) = inner.scripts.iter_mut().find(|s| s.id == script_id) {
                if let Some(step) = script.step_mut(step_id) {
                    step.state = StepState::Done;
                    script.current_step_id = Some(step_id);
                }
            }
        })
    }

    fn record_answer(&mut self, script_id: ScriptId, step_id: StepId, answer: &str) -> Result<()> {
        self.write(|inner| {
            if let Some(step) = inner
                .scripts
                .iter_mut()
                .find(|s| s.id == script_id)
                .and_then(|script| script.step_mut(step_id))
            {
                step.user_answer = Some(answer.to_string());
            }
        })
    }

    fn update_script(
        &mut self,
        script_id: ScriptId,
        state: ScriptState,
        current_step_id: Option<StepId>,
    ) -> Result<()> {
        self.write(|inner| {
            if let Some(script) = inner.scripts.iter_mut().find(|s| s.id == script_id) {
                script.state = state;
                script.current_step_id = current_step_id;
            }
        })
    }

    fn reset_session(&mut self) -> Result<()> {
        self.write(|inner| {
            inner.scripts.clear();
            inner.messages.clear();
        })
    }
}
