//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.quote_mark.set_fg(Color::Cyan);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[34m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        io::stdout().flush().context("Failed to flush stdout")
    }

    /// Render a one-line status such as the typing indicator
    pub fn notice(&self, text: &str) -> Result<()> {
        if self.rich_enabled {
            println!("\x1b[2m{text}\x1b[0m");
        } else {
            println!("{text}");
        }
        io::stdout().flush().context("Failed to flush stdout")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
