use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal client for Eva, the sleep-course assistant
///
/// Eva walks you through scripted conversations about sleep. Answer by typing
/// one of the offered choices (or its number); once a script is finished she
/// answers free text with short tips.
#[derive(Parser)]
#[command(version, about, name = "eva")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/eva/eva.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Milliseconds before Eva starts typing
    #[arg(long, global = true, default_value_t = 500)]
    pub typing_delay_ms: u64,

    /// Milliseconds Eva spends typing each message
    #[arg(long, global = true, default_value_t = 3000)]
    pub response_delay_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Eva CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Chat interactively (`/reset` starts over, `/quit` leaves)
    #[command(alias = "c")]
    Chat,
    /// Send one message and print Eva's answer
    #[command(alias = "s")]
    Say(SayArgs),
    /// Show the conversation so far
    #[command(alias = "h")]
    History,
    /// Show the steps of the main script
    Script,
    /// Delete the conversation and start over
    Reset,
    /// Show which script follows an article
    Article(ArticleArgs),
}

#[derive(clap::Args)]
pub struct SayArgs {
    /// Message text, or the number of an offered choice
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl SayArgs {
    /// Words joined back into one message.
    pub fn message(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(clap::Args)]
pub struct ArticleArgs {
    /// Article ID
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_say_joins_words() {
        let args = Args::parse_from(["eva", "say", "Привет,", "а", "кто", "ты", "🙂"]);
        match args.command {
            Some(Commands::Say(say)) => assert_eq!(say.message(), "Привет, а кто ты 🙂"),
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn test_delay_defaults() {
        let args = Args::parse_from(["eva"]);
        assert_eq!(args.typing_delay_ms, 500);
        assert_eq!(args.response_delay_ms, 3000);
        assert!(args.command.is_none());
    }
}
