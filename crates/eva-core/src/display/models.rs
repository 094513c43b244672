//! Display implementations for domain models.
//!
//! Output is markdown so the CLI can render it with a skin or print it as
//! plain text.

use std::fmt;

use super::datetime::LocalTime;
use crate::models::{Message, Mood, Script, ScriptState, Step, StepKind, StepState};

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ScriptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}** _{}_", self.author_name, LocalTime(&self.date))?;
        writeln!(f)?;
        if self.is_from_user {
            // user lines render as a quote, like the right-hand chat bubble
            for line in self.body.lines() {
                writeln!(f, "> {line}")?;
            }
        } else {
            writeln!(f, "{}", self.body)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.name,
            self.state.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Type: {}", self.kind)?;
        if !self.next_step_ids.is_empty() {
            let next: Vec<String> = self.next_step_ids.iter().map(u64::to_string).collect();
            writeln!(f, "- Next: {}", next.join(", "))?;
        }
        writeln!(f)?;

        let text = self.plain_message();
        if !text.is_empty() {
            writeln!(f, "{text}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- State: {}", self.state)?;
        writeln!(f, "- Step progress: {}", self.computed_state())?;
        writeln!(f, "- Main: {}", if self.is_main { "yes" } else { "no" })?;
        if let Some(step_id) = self.current_step_id {
            writeln!(f, "- Current step: {step_id}")?;
        }
        if let Some(next) = self.next_script_id {
            writeln!(f, "- Next script: {next}")?;
        }
        if let Some(article) = self.article_id {
            writeln!(f, "- Article: {article}")?;
        }

        let steps = self.sorted_steps();
        if steps.is_empty() {
            writeln!(f, "\nNo steps in this script.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}
