//! Step model definition and related functionality.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{StepKind, StepState};

/// Identifier of a step, unique within the store.
pub type StepId = u64;

/// A single node of a dialogue graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: StepId,

    /// Short label, used as the button text when this step is a branch target
    pub name: String,

    /// Rich-text (HTML) message body
    pub message: String,

    /// Ordering hint among the steps of the same script
    pub sequence: i64,

    /// Processing state of the step
    #[serde(default)]
    pub state: StepState,

    /// Interaction type of the step
    #[serde(default, rename = "type")]
    pub kind: StepKind,

    /// Outgoing edges of the dialogue graph, in order
    #[serde(default)]
    pub next_step_ids: Vec<StepId>,

    /// Captured answer for steps that take a typed payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,

    /// Captured code for steps that take a typed payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Step {
    /// Create a step with no captured payload.
    pub fn new(
        id: StepId,
        name: impl Into<String>,
        message: impl Into<String>,
        sequence: i64,
        state: StepState,
        kind: StepKind,
        next_step_ids: Vec<StepId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            message: message.into(),
            sequence,
            state,
            kind,
            next_step_ids,
            user_answer: None,
            code: None,
        }
    }

    /// The message with every markup tag removed.
    ///
    /// ```rust
    /// use eva_core::models::{Step, StepKind, StepState};
    ///
    /// let step = Step::new(1, "Hi", "<p>Hello <b>there</b></p>", 0, StepState::NotRunning, StepKind::Nothing, vec![]);
    /// assert_eq!(step.plain_message(), "Hello there");
    /// ```
    pub fn plain_message(&self) -> String {
        static TAG: OnceLock<Regex> = OnceLock::new();
        let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
        tag.replace_all(&self.message, "").into_owned()
    }

    /// Whether the step's message has been emitted.
    pub fn is_done(&self) -> bool {
        self.state == StepState::Done
    }
}
