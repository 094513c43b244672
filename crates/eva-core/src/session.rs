//! Session controller: one actor task that owns the dialogue engine.
//!
//! The controller applies the engine's continuations with human-like timing.
//! Every assistant message is preceded by a typing delay, after which
//! [`SessionEvent::TypingStarted`] is broadcast, and a response delay, after
//! which the message itself is appended.
//!
//! ```text
//!  SessionHandle ──Command──▶ ┌────────────────────┐ ──SessionEvent──▶ subscribers
//!     (mpsc)                  │   SessionActor     │     (broadcast)
//!                             │  DialogueEngine<S> │
//!                             │  pending deadline  │
//!                             │  queued input      │
//!                             └────────────────────┘
//! ```
//!
//! Input that arrives while a delivery is pending is queued and processed in
//! order once the session is idle. A reset cancels both.

use std::{collections::VecDeque, time::Duration};

use tokio::{
    sync::{broadcast, mpsc, oneshot},
    time::{self, Instant},
};

use crate::{
    engine::{Continuation, DialogueEngine, Turn},
    error::{DialogueError, Result},
    models::{Message, Script, StepId},
    store::DialogueStore,
};

pub mod builder;


const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

/// Something that happened in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Eva started typing the next message
    TypingStarted,
    /// A message was added to the log
    MessageAppended(Message),
    /// The offered choices changed (empty when none are offered)
    ButtonsChanged(Vec<String>),
    /// A transition failed; the session stays idle
    Error(String),
    /// The session was wiped and bootstrapped again
    Reset,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub buttons: Vec<String>,
    pub script: Option<Script>,
    pub current_step_id: Option<StepId>,
    pub is_typing: bool,
    pub is_free_text: bool,
}

/// Timing of assistant messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub typing_delay: Duration,
    pub response_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(500),
            response_delay: Duration::from_secs(3),
        }
    }
}

enum Command {
    Input(String),
    Reset(oneshot::Sender<()>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Settled(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

/// What gets appended once a delivery fires.
#[derive(Debug, Clone)]
enum Delivery {
    Step(StepId),
    Text(String),
}

#[derive(Debug)]
enum Action {
    ShowTyping(Delivery),
    Deliver(Delivery),
}

#[derive(Debug)]
struct Scheduled {
    deadline: Instant,
    action: Action,
}

/// Cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Spawn the session actor on the current tokio runtime.
    pub(crate) fn spawn<S>(engine: DialogueEngine<S>, timing: SessionTiming) -> Self
    where
        S: DialogueStore + Send + 'static,
    {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let actor = SessionActor {
            engine,
            timing,
            commands: commands_rx,
            events: events_tx.clone(),
            pending: None,
            queue: VecDeque::new(),
            waiters: Vec::new(),
            announced_buttons: Vec::new(),
            typing: false,
        };
        tokio::spawn(actor.run());

        Self {
            commands: commands_tx,
            events: events_tx,
        }
    }

    /// Send user text (typed or a tapped choice).
    pub async fn send(&self, text: impl Into<String>) -> Result<()> {
        self.command(Command::Input(text.into())).await
    }

    /// Wipe the session and start over. Resolves once the fresh session is
    /// bootstrapped.
    pub async fn reset(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.command(Command::Reset(tx)).await?;
        rx.await.map_err(|_| DialogueError::SessionClosed)
    }

    /// Current state of the session.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.command(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| DialogueError::SessionClosed)
    }

    /// Wait until nothing is scheduled or queued, then return the state.
    pub async fn settled(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.command(Command::Settled(tx)).await?;
        rx.await.map_err(|_| DialogueError::SessionClosed)
    }

    /// Receive session events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Stop the actor. Pending deliveries are dropped.
    pub async fn shutdown(&self) -> Result<()> {
        self.command(Command::Shutdown).await
    }

    async fn command(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DialogueError::SessionClosed)
    }
}

struct SessionActor<S> {
    engine: DialogueEngine<S>,
    timing: SessionTiming,
    commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<SessionEvent>,
    pending: Option<Scheduled>,
    queue: VecDeque<String>,
    waiters: Vec<oneshot::Sender<SessionSnapshot>>,
    announced_buttons: Vec<String>,
    typing: bool,
}

impl<S: DialogueStore> SessionActor<S> {
    async fn run(mut self) {
        log::info!("Starting session");
        let resumed = self.engine.resume();
        self.apply(resumed);
        self.settle();

        loop {
            let deadline = self.pending.as_ref().map(|s| s.deadline);

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire();
                }
            }

            self.settle();
        }

        log::info!("Session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Input(text) => {
                if self.pending.is_some() {
                    log::debug!("Delivery pending, queueing input");
                    self.queue.push_back(text);
                } else {
                    self.handle_input(&text);
                }
            }
            Command::Reset(done) => {
                self.pending = None;
                self.queue.clear();
                self.typing = false;
                let restarted = self.engine.reset();
                self.broadcast(SessionEvent::Reset);
                self.apply(restarted);
                let _ = done.send(());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Settled(reply) => self.waiters.push(reply),
            Command::Shutdown => {}
        }
    }

    fn handle_input(&mut self, text: &str) {
        let Some(Turn {
            message,
            continuation,
        }) = self.engine.submit(text)
        else {
            log::debug!("Ignoring blank input");
            return;
        };

        self.broadcast(SessionEvent::MessageAppended(message));
        self.apply(Ok(continuation));
    }

    fn fire(&mut self) {
        let Some(Scheduled { action, .. }) = self.pending.take() else {
            return;
        };

        match action {
            Action::ShowTyping(delivery) => {
                self.typing = true;
                self.broadcast(SessionEvent::TypingStarted);
                self.pending = Some(Scheduled {
                    deadline: Instant::now() + self.timing.response_delay,
                    action: Action::Deliver(delivery),
                });
            }
            Action::Deliver(delivery) => {
                self.typing = false;
                let turn = match delivery {
                    Delivery::Step(step_id) => self.engine.emit_step(step_id),
                    Delivery::Text(body) => Ok(self.engine.post_reply(&body)),
                };
                match turn {
                    Ok(Turn {
                        message,
                        continuation,
                    }) => {
                        self.broadcast(SessionEvent::MessageAppended(message));
                        self.apply(Ok(continuation));
                    }
                    Err(e) => self.apply(Err(e)),
                }
            }
        }
    }

    fn apply(&mut self, continuation: Result<Continuation>) {
        match continuation {
            Ok(Continuation::Emit(step_id)) => self.schedule(Delivery::Step(step_id)),
            Ok(Continuation::Reply(body)) => self.schedule(Delivery::Text(body)),
            Ok(Continuation::AwaitChoice(_) | Continuation::Idle) => {}
            Err(e) => {
                log::error!("Session transition failed: {e}");
                self.broadcast(SessionEvent::Error(e.to_string()));
            }
        }
        self.announce_buttons();
    }

    fn schedule(&mut self, delivery: Delivery) {
        log::debug!("Scheduling {delivery:?}");
        self.pending = Some(Scheduled {
            deadline: Instant::now() + self.timing.typing_delay,
            action: Action::ShowTyping(delivery),
        });
    }

    /// Process queued input while idle, then release `settled()` waiters.
    fn settle(&mut self) {
        while self.pending.is_none() {
            let Some(text) = self.queue.pop_front() else {
                break;
            };
            self.handle_input(&text);
        }

        if self.pending.is_none() && !self.waiters.is_empty() {
            let snapshot = self.snapshot();
            for waiter in self.waiters.drain(..) {
                let _ = waiter.send(snapshot.clone());
            }
        }
    }

    fn announce_buttons(&mut self) {
        if self.engine.buttons() != self.announced_buttons.as_slice() {
            self.announced_buttons = self.engine.buttons().to_vec();
            self.broadcast(SessionEvent::ButtonsChanged(self.announced_buttons.clone()));
        }
    }

    fn broadcast(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.engine.messages().to_vec(),
            buttons: self.engine.buttons().to_vec(),
            script: self.engine.script().cloned(),
            current_step_id: self.engine.current_step_id(),
            is_typing: self.typing,
            is_free_text: self.engine.is_free_text(),
        }
    }
}
