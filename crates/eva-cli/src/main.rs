//! Eva CLI Application
//!
//! Command-line client for the Eva sleep-course assistant.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use eva_core::SessionBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        typing_delay_ms,
        response_delay_ms,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    let session = SessionBuilder::new()
        .with_database_path(database_file)
        .with_typing_delay(Duration::from_millis(typing_delay_ms))
        .with_response_delay(Duration::from_millis(response_delay_ms))
        .build()
        .await
        .context("Failed to start session")?;

    info!("Eva started");

    let cli = Cli::new(session.clone(), renderer);
    let result = match command {
        Some(Chat) => cli.chat().await,
        Some(Say(args)) => cli.say(&args.message()).await,
        Some(Script) => cli.script().await,
        Some(Reset) => cli.reset().await,
        Some(Article(args)) => cli.article(args.id),
        Some(History) | None => cli.history().await,
    };

    session.shutdown().await.context("Failed to stop session")?;
    result
}
