//! Dialogue engine: the state machine behind the chat assistant.
//!
//! The engine owns the active main script, the message log and the dialogue
//! cursor. Each transition returns a [`Continuation`] telling the caller what
//! should happen next; timing is left to the caller (see [`crate::session`]).
//!
//! ```text
//!            resume()                emit_step(id)
//!   store ──────────────▶ Emit(id) ───────────────▶ AwaitChoice(buttons)
//!                                      │      ▲            │ submit(answer)
//!                                      │      └─ Emit(id) ◀┤
//!                                      ▼                   ▼
//!                                    Idle ──submit──▶ Reply(text) ──post_reply──▶ Idle
//! ```
//!
//! Persistence is best-effort: a failed store write is logged and otherwise
//! ignored, and the in-memory state stays authoritative for the session.

use crate::{
    error::{DialogueError, Result},
    message_log::MessageLog,
    models::{Message, Mood, Script, ScriptState, Step, StepId, StepKind, StepState},
    seed,
    store::DialogueStore,
};

pub mod replies;


/// Default number of consecutive auto-advance hops allowed without user input.
pub const DEFAULT_MAX_AUTO_ADVANCE: usize = 64;

/// What the caller should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Emit the message of this step next
    Emit(StepId),
    /// Post this assistant text next
    Reply(String),
    /// Offer these choices and wait for the user
    AwaitChoice(Vec<String>),
    /// Nothing to do until the user writes
    Idle,
}

/// A message appended by a transition and what follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub message: Message,
    pub continuation: Continuation,
}

/// State machine driving a scripted conversation.
pub struct DialogueEngine<S> {
    store: S,
    script: Option<Script>,
    log: MessageLog,
    current_step: Option<StepId>,
    buttons: Vec<String>,
    auto_advance_run: usize,
    max_auto_advance: usize,
}

impl<S: DialogueStore> DialogueEngine<S> {
    /// Create an engine over a store. Call [`DialogueEngine::resume`] before
    /// anything else.
    pub fn new(store: S) -> Self {
        Self {
            store,
            script: None,
            log: MessageLog::new(),
            current_step: None,
            buttons: Vec::new(),
            auto_advance_run: 0,
            max_auto_advance: DEFAULT_MAX_AUTO_ADVANCE,
        }
    }

    /// Limit consecutive auto-advance hops.
    pub fn with_max_auto_advance(mut self, limit: usize) -> Self {
        self.max_auto_advance = limit;
        self
    }

    /// Load the session from the store, bootstrapping the start script when
    /// no main script exists.
    ///
    /// A step whose message is already in the log is never emitted again: its
    /// buttons or auto-advance are recomputed instead.
    pub fn resume(&mut self) -> Result<Continuation> {
        let messages = self.store.load_messages().unwrap_or_else(|e| {
            log::warn!("Failed to load messages, starting with an empty log: {e}");
            Vec::new()
        });
        let scripts = self.store.load_scripts().unwrap_or_else(|e| {
            log::warn!("Failed to load scripts, starting from the seed: {e}");
            Vec::new()
        });
        self.start(scripts, messages)
    }

    /// Delete all messages and scripts, then bootstrap a fresh session.
    pub fn reset(&mut self) -> Result<Continuation> {
        if let Err(e) = self.store.reset_session() {
            log::warn!("Failed to reset stored session: {e}");
        }
        log::info!("Session reset");
        self.start(Vec::new(), Vec::new())
    }

    fn start(&mut self, scripts: Vec<Script>, messages: Vec<Message>) -> Result<Continuation> {
        self.log = MessageLog::from_messages(messages);
        self.buttons.clear();
        self.auto_advance_run = 0;
        self.current_step = None;

        let script = self.select_main_script(scripts);
        let running = script.state == ScriptState::Running;
        let current = script
            .current_step_id
            .and_then(|id| script.step(id))
            .or_else(|| script.next_pending_step())
            .map(|step| (step.id, step.is_done()));
        self.script = Some(script);

        if !running {
            log::info!("No running main script, continuing in free-text mode");
            return Ok(Continuation::Idle);
        }

        let Some((step_id, emitted)) = current else {
            log::info!("Main script has no pending step, continuing in free-text mode");
            return Ok(Continuation::Idle);
        };

        self.current_step = Some(step_id);
        if self.log.is_empty() || !emitted {
            log::debug!("Resuming at step {step_id}, emitting it");
            return Ok(Continuation::Emit(step_id));
        }

        if let Some(answer) = self.unanswered_input() {
            log::debug!("Resuming at step {step_id} with unanswered input {answer:?}");
            return Ok(self.answer(step_id, &answer));
        }

        log::debug!("Resuming at step {step_id} without replaying its message");
        self.continuation_after(step_id)
    }

    fn select_main_script(&mut self, mut scripts: Vec<Script>) -> Script {
        if let Some(pos) = scripts
            .iter()
            .position(|s| s.is_main && s.state == ScriptState::Running)
        {
            return scripts.swap_remove(pos);
        }

        if let Some(pos) = scripts.iter().position(|s| s.is_main) {
            let mut script = scripts.swap_remove(pos);
            if self.log.is_empty() {
                script.state = ScriptState::Running;
                let (id, cursor) = (script.id, script.current_step_id);
                self.persist("restart main script", |store| {
                    store.update_script(id, ScriptState::Running, cursor)
                });
            }
            return script;
        }

        if !scripts.is_empty() {
            let script = scripts.remove(0);
            log::info!("No main script stored, using script {}", script.id);
            return script;
        }

        let script = seed::start_script();
        log::info!("Bootstrapping start script {}", script.id);
        self.persist("insert start script", |store| store.insert_script(&script));
        script
    }

    /// Emit a step: append its plain-text message, mark it done and move the
    /// cursor to it.
    pub fn emit_step(&mut self, step_id: StepId) -> Result<Turn> {
        let script = self.script.as_mut().ok_or_else(|| {
            DialogueError::invalid_input("step_id").with_reason("no script is loaded")
        })?;
        let script_id = script.id;
        let step = script.step_mut(step_id).ok_or_else(|| {
            DialogueError::invalid_input("step_id")
                .with_reason(format!("step {step_id} is not part of script {script_id}"))
        })?;

        step.state = StepState::Done;
        let body = step.plain_message();
        script.current_step_id = Some(step_id);
        self.current_step = Some(step_id);

        let message = self.log.append(body, false).clone();
        log::debug!("Emitted step {step_id} as message {}", message.id);
        self.persist("append message", |store| store.append_message(&message));
        self.persist("advance step", |store| store.advance_step(script_id, step_id));

        let continuation = self.continuation_after(step_id)?;
        Ok(Turn {
            message,
            continuation,
        })
    }

    /// Handle text typed or tapped by the user. Blank input is ignored.
    pub fn submit(&mut self, text: &str) -> Option<Turn> {
        if text.trim().is_empty() {
            return None;
        }

        let message = self.log.append(text, true).clone();
        self.persist("append message", |store| store.append_message(&message));
        self.auto_advance_run = 0;

        let continuation = match self.current_step {
            Some(step_id) => self.answer(step_id, text),
            None => Continuation::Reply(replies::canned_reply(text).to_string()),
        };

        Some(Turn {
            message,
            continuation,
        })
    }

    /// Post an assistant text that does not belong to a step.
    pub fn post_reply(&mut self, body: &str) -> Turn {
        let message = self.log.append(body, false).clone();
        self.persist("append message", |store| store.append_message(&message));
        Turn {
            message,
            continuation: Continuation::Idle,
        }
    }

    /// Resolve the user's answer to `step_id` into the next transition.
    fn answer(&mut self, step_id: StepId, text: &str) -> Continuation {
        self.buttons.clear();
        self.record_mood(step_id, text);

        let next = self.script.as_ref().and_then(|script| {
            script
                .step(step_id)
                .and_then(|step| script.next_step(step, Some(text)))
                .map(|next| next.id)
        });
        match next {
            Some(next_id) => {
                log::debug!("Answer {text:?} leads from step {step_id} to {next_id}");
                Continuation::Emit(next_id)
            }
            None => {
                log::debug!("No continuation after step {step_id}, stage complete");
                self.finish_script(ScriptState::Done);
                Continuation::Reply(replies::STAGE_COMPLETE.to_string())
            }
        }
    }

    /// User text logged after the cursor step but never acted on.
    fn unanswered_input(&self) -> Option<String> {
        self.log
            .last()
            .filter(|message| message.is_from_user)
            .map(|message| message.body.clone())
    }

    fn record_mood(&mut self, step_id: StepId, text: &str) {
        let Some(script) = self.script.as_mut() else {
            return;
        };
        let script_id = script.id;
        let Some(step) = script.step_mut(step_id) else {
            return;
        };
        if step.kind != StepKind::Mood {
            return;
        }
        let Some(mood) = Mood::from_label(text) else {
            log::debug!("Answer {text:?} to mood step {step_id} is not a mood");
            return;
        };

        step.user_answer = Some(mood.label().to_string());
        log::info!("Recorded mood {mood:?} (score {})", mood.score());
        self.persist("record mood", |store| {
            store.record_answer(script_id, step_id, mood.label())
        });
    }

    /// Stop the script and drop to free-text mode.
    fn finish_script(&mut self, state: ScriptState) {
        self.current_step = None;
        self.buttons.clear();
        if let Some(script) = self.script.as_mut() {
            script.state = state;
            script.current_step_id = None;
            let id = script.id;
            self.persist("finish script", |store| store.update_script(id, state, None));
        }
    }

    fn continuation_after(&mut self, step_id: StepId) -> Result<Continuation> {
        let Some(script) = self.script.as_ref() else {
            return Ok(Continuation::Idle);
        };
        let Some(step) = script.step(step_id) else {
            return Ok(Continuation::Idle);
        };

        let buttons = script.button_titles(step);
        let target = if script.should_auto_advance(step) {
            script.auto_advance_target(step).map(|s| s.id)
        } else {
            None
        };

        if !buttons.is_empty() {
            self.auto_advance_run = 0;
            self.buttons = buttons.clone();
            return Ok(Continuation::AwaitChoice(buttons));
        }

        self.buttons.clear();
        let Some(target) = target else {
            return Ok(Continuation::Idle);
        };

        self.auto_advance_run += 1;
        if self.auto_advance_run > self.max_auto_advance {
            self.auto_advance_run = 0;
            log::error!(
                "Auto-advance from step {step_id} exceeded {} hops, failing the script",
                self.max_auto_advance
            );
            self.finish_script(ScriptState::Failed);
            return Err(DialogueError::AutoAdvanceLoop {
                step_id,
                limit: self.max_auto_advance,
            });
        }
        Ok(Continuation::Emit(target))
    }

    fn persist(&mut self, what: &str, op: impl FnOnce(&mut S) -> Result<()>) {
        if let Err(e) = op(&mut self.store) {
            log::warn!("Failed to {what}: {e}");
        }
    }

    /// The active main script.
    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    /// The step the dialogue is at, `None` in free-text mode.
    pub fn current_step(&self) -> Option<&Step> {
        let id = self.current_step?;
        self.script.as_ref()?.step(id)
    }

    /// Id of the step the dialogue is at.
    pub fn current_step_id(&self) -> Option<StepId> {
        self.current_step
    }

    /// Whether user text gets canned replies instead of graph transitions.
    pub fn is_free_text(&self) -> bool {
        self.current_step.is_none()
    }

    /// Choices currently offered to the user.
    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    /// The message log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
