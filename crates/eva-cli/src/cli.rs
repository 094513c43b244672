//! Command handlers for the Eva CLI
//!
//! Each handler talks to the running session through its [`SessionHandle`]
//! and renders the result as markdown through the [`TerminalRenderer`].

use anyhow::{bail, Context, Result};
use eva_core::{
    seed, Buttons, Message, Messages, OperationStatus, SessionEvent, SessionHandle,
};
use log::{debug, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};

use crate::renderer::TerminalRenderer;

const TYPING_NOTICE: &str = "Eva is typing…";

/// CLI front end bound to one session
pub struct Cli {
    session: SessionHandle,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(session: SessionHandle, renderer: TerminalRenderer) -> Self {
        Self { session, renderer }
    }

    /// Print the whole conversation and the offered choices.
    pub async fn history(&self) -> Result<()> {
        let snapshot = self
            .session
            .settled()
            .await
            .context("Failed to load conversation")?;

        self.renderer.render(&Messages(snapshot.messages).to_string())?;
        self.show_buttons(&Buttons(snapshot.buttons))
    }

    /// Print the main script with its steps.
    pub async fn script(&self) -> Result<()> {
        let snapshot = self
            .session
            .snapshot()
            .await
            .context("Failed to load script")?;

        match snapshot.script {
            Some(script) => self.renderer.render(&script.to_string()),
            None => self.renderer.render("No script loaded.\n"),
        }
    }

    /// Wipe the conversation.
    pub async fn reset(&self) -> Result<()> {
        self.session
            .reset()
            .await
            .context("Failed to reset session")?;
        self.renderer
            .render(&OperationStatus::success("Session reset").to_string())
    }

    /// Send one message, wait for Eva to finish answering and print what is
    /// new.
    pub async fn say(&self, text: &str) -> Result<()> {
        let before = self
            .session
            .settled()
            .await
            .context("Failed to load conversation")?;
        let last_seen = before.messages.last().map_or(0, |m| m.id);
        let text = Buttons(before.buttons).resolve(text).to_string();

        if text.trim().is_empty() {
            bail!("Message is empty");
        }

        debug!("Sending {text:?}");
        self.session
            .send(text)
            .await
            .context("Failed to send message")?;
        let after = self
            .session
            .settled()
            .await
            .context("Failed to wait for reply")?;

        let new: Vec<Message> = after
            .messages
            .into_iter()
            .filter(|m| m.id > last_seen)
            .collect();
        self.renderer.render(&Messages(new).to_string())?;
        self.show_buttons(&Buttons(after.buttons))
    }

    /// Interactive chat on stdin until `/quit` or end of input.
    pub async fn chat(&self) -> Result<()> {
        let mut events = self.session.subscribe();
        let snapshot = self
            .session
            .snapshot()
            .await
            .context("Failed to load conversation")?;

        let mut last_shown = self.show_new(&snapshot.messages, 0)?;
        let mut buttons = Buttons(snapshot.buttons);
        self.show_buttons(&buttons)?;
        if snapshot.is_typing {
            self.renderer.notice(TYPING_NOTICE)?;
        }

        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => self.show_event(event, &mut last_shown, &mut buttons)?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Missed {skipped} session events, resynchronizing");
                        let snapshot = self.session.snapshot().await?;
                        last_shown = self.show_new(&snapshot.messages, last_shown)?;
                        buttons = Buttons(snapshot.buttons);
                    }
                    Err(RecvError::Closed) => break,
                },
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        // end of input: let Eva finish before leaving
                        let snapshot = self.session.settled().await?;
                        self.show_new(&snapshot.messages, last_shown)?;
                        self.show_buttons(&Buttons(snapshot.buttons))?;
                        break;
                    };

                    match line.trim() {
                        "/quit" | "/exit" => break,
                        "/reset" => self.session.reset().await?,
                        _ => self.session.send(buttons.resolve(&line).to_string()).await?,
                    }
                }
            }
        }

        Ok(())
    }

    /// Print the script that follows an article.
    pub fn article(&self, article_id: u64) -> Result<()> {
        match seed::script_id_for_article(article_id) {
            Some(script_id) => self.renderer.render(&format!(
                "Article {article_id} continues with script {script_id}\n"
            )),
            None => bail!("No follow-up script for article {article_id}"),
        }
    }

    fn show_event(
        &self,
        event: SessionEvent,
        last_shown: &mut u64,
        buttons: &mut Buttons,
    ) -> Result<()> {
        match event {
            SessionEvent::TypingStarted => self.renderer.notice(TYPING_NOTICE),
            SessionEvent::MessageAppended(message) => {
                *last_shown = self.show_new(std::slice::from_ref(&message), *last_shown)?;
                Ok(())
            }
            SessionEvent::ButtonsChanged(labels) => {
                *buttons = Buttons(labels);
                self.show_buttons(buttons)
            }
            SessionEvent::Error(message) => self
                .renderer
                .render(&OperationStatus::failure(message).to_string()),
            SessionEvent::Reset => {
                *last_shown = 0;
                self.renderer
                    .render(&OperationStatus::success("Session reset").to_string())
            }
        }
    }

    /// Render messages newer than `last_shown`, returning the newest id shown.
    fn show_new(&self, messages: &[Message], last_shown: u64) -> Result<u64> {
        let mut newest = last_shown;
        for message in messages.iter().filter(|m| m.id > last_shown) {
            self.renderer.render(&message.to_string())?;
            newest = newest.max(message.id);
        }
        Ok(newest)
    }

    fn show_buttons(&self, buttons: &Buttons) -> Result<()> {
        if buttons.is_empty() {
            return Ok(());
        }
        self.renderer.render(&buttons.to_string())
    }
}
