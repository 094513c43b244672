//! State and type enumerations for scripts and steps.
//!
//! All three enums are persisted as their snake_case string form. Parsing goes
//! through [`FromStr`], and stored values are decoded with `parse_or_default`,
//! which falls back to a safe default instead of failing the session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processing state of a single step.
///
/// The engine only drives `NotRunning -> Done`. The intermediate states are
/// reserved for asynchronous step processing and are only ever read back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Step has not been shown yet
    #[default]
    NotRunning,

    /// Step is preparing its payload
    PreProcessing,

    /// Step is waiting on external input
    Waiting,

    /// Step is handling a received payload
    PostProcessing,

    /// Step message has been emitted
    Done,

    /// Step processing failed
    Failed,
}

impl FromStr for StepState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_running" => Ok(StepState::NotRunning),
            "pre_processing" => Ok(StepState::PreProcessing),
            "waiting" => Ok(StepState::Waiting),
            "post_processing" => Ok(StepState::PostProcessing),
            "done" => Ok(StepState::Done),
            "failed" => Ok(StepState::Failed),
            _ => Err(format!("Invalid step state: {s}")),
        }
    }
}

impl StepState {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepState::NotRunning => "not_running",
            StepState::PreProcessing => "pre_processing",
            StepState::Waiting => "waiting",
            StepState::PostProcessing => "post_processing",
            StepState::Done => "done",
            StepState::Failed => "failed",
        }
    }

    /// Decode a stored value, falling back to [`StepState::NotRunning`].
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using not_running");
            Self::default()
        })
    }

    /// Whether the step sits in one of the in-flight processing states.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            StepState::PreProcessing | StepState::Waiting | StepState::PostProcessing
        )
    }

    /// Get state with a status icon for display.
    ///
    /// ```rust
    /// use eva_core::models::StepState;
    ///
    /// assert_eq!(StepState::Done.with_icon(), "✓ Done");
    /// assert_eq!(StepState::NotRunning.with_icon(), "○ Not running");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepState::NotRunning => "○ Not running",
            StepState::PreProcessing => "➤ Pre-processing",
            StepState::Waiting => "… Waiting",
            StepState::PostProcessing => "➤ Post-processing",
            StepState::Done => "✓ Done",
            StepState::Failed => "✗ Failed",
        }
    }
}

/// Interaction type of a step, deciding how its continuations are computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Plain narrative step
    #[default]
    Nothing,

    /// Successors are offered as buttons labelled with their names
    NextStepName,

    /// Captures an email address
    Email,

    /// Captures a time of day
    Time,

    /// Points at an article
    Article,

    /// Asks for the user's mood
    Mood,

    /// Points at a ritual line
    RitualLine,

    /// Points at a ritual
    Ritual,

    /// Asks for push notification consent
    Push,
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nothing" => Ok(StepKind::Nothing),
            "next_step_name" => Ok(StepKind::NextStepName),
            "email" => Ok(StepKind::Email),
            "time" => Ok(StepKind::Time),
            "article" => Ok(StepKind::Article),
            "mood" => Ok(StepKind::Mood),
            "ritual_line" => Ok(StepKind::RitualLine),
            "ritual" => Ok(StepKind::Ritual),
            "push" => Ok(StepKind::Push),
            _ => Err(format!("Invalid step type: {s}")),
        }
    }
}

impl StepKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Nothing => "nothing",
            StepKind::NextStepName => "next_step_name",
            StepKind::Email => "email",
            StepKind::Time => "time",
            StepKind::Article => "article",
            StepKind::Mood => "mood",
            StepKind::RitualLine => "ritual_line",
            StepKind::Ritual => "ritual",
            StepKind::Push => "push",
        }
    }

    /// Decode a stored value, falling back to [`StepKind::Nothing`].
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using nothing");
            Self::default()
        })
    }
}

/// Run state of a whole script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScriptState {
    /// Script has not been started
    #[default]
    NotRunning,

    /// Script drives the conversation
    Running,

    /// Script finished
    Done,

    /// Script failed
    Failed,
}

impl FromStr for ScriptState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_running" => Ok(ScriptState::NotRunning),
            "running" => Ok(ScriptState::Running),
            "done" => Ok(ScriptState::Done),
            "failed" => Ok(ScriptState::Failed),
            _ => Err(format!("Invalid script state: {s}")),
        }
    }
}

impl ScriptState {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptState::NotRunning => "not_running",
            ScriptState::Running => "running",
            ScriptState::Done => "done",
            ScriptState::Failed => "failed",
        }
    }

    /// Decode a stored value, falling back to [`ScriptState::NotRunning`].
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using not_running");
            Self::default()
        })
    }
}
