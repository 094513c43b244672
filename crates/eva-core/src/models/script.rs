//! Script model and dialogue graph operations.
//!
//! A script owns an unordered collection of steps. Traversal is driven by each
//! step's `next_step_ids`; `sequence` only fixes a deterministic order for
//! lookups, so every query below walks [`Script::sorted_steps`].

use serde::{Deserialize, Serialize};

use super::{ScriptState, Step, StepId, StepKind, StepState, MOOD_LABELS};

/// Identifier of a script, unique within the store.
pub type ScriptId = u64;

/// A named dialogue graph together with its run state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Script {
    /// Unique identifier for the script
    pub id: ScriptId,

    /// Display name of the script
    pub name: String,

    /// Whether this script drives the home chat
    pub is_main: bool,

    /// Run state of the script
    #[serde(default)]
    pub state: ScriptState,

    /// Article this script belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<u64>,

    /// Ritual line this script belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ritual_line_id: Option<u64>,

    /// Follow-up script to chain into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_script_id: Option<ScriptId>,

    /// Step whose message was emitted most recently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step_id: Option<StepId>,

    /// Steps owned by the script
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Create an empty script.
    pub fn new(id: ScriptId, name: impl Into<String>, state: ScriptState, is_main: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_main,
            state,
            article_id: None,
            ritual_line_id: None,
            next_script_id: None,
            current_step_id: None,
            steps: Vec::new(),
        }
    }

    /// Attach the follow-up script id.
    pub fn with_next_script(mut self, next_script_id: ScriptId) -> Self {
        self.next_script_id = Some(next_script_id);
        self
    }

    /// Replace the step collection.
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// State derived from the states of the steps.
    pub fn computed_state(&self) -> ScriptState {
        if self.steps.iter().any(|s| s.state == StepState::Failed) {
            ScriptState::Failed
        } else if self.steps.iter().any(|s| s.state.is_processing()) {
            ScriptState::Running
        } else if self.steps.iter().all(Step::is_done) {
            ScriptState::Done
        } else {
            ScriptState::NotRunning
        }
    }

    /// Steps ordered by `sequence` ascending. Equal sequences keep their
    /// collection order.
    pub fn sorted_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.sequence);
        steps
    }

    /// Look up a step by id.
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub(crate) fn step_mut(&mut self, id: StepId) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id == id)
    }

    /// First step in sequence order that is not done yet.
    pub fn next_pending_step(&self) -> Option<&Step> {
        self.sorted_steps().into_iter().find(|s| !s.is_done())
    }

    /// Successors of `step` that exist in this script, in sequence order.
    /// Dangling ids are skipped.
    pub fn successors(&self, step: &Step) -> Vec<&Step> {
        self.sorted_steps()
            .into_iter()
            .filter(|s| step.next_step_ids.contains(&s.id))
            .collect()
    }

    /// Labels of the choices offered after `step`.
    pub fn button_titles(&self, step: &Step) -> Vec<String> {
        match step.kind {
            StepKind::NextStepName => self
                .successors(step)
                .into_iter()
                .map(|s| s.name.clone())
                .collect(),
            StepKind::Mood => MOOD_LABELS.iter().map(|l| (*l).to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve the successor of `step` for the given answer.
    ///
    /// Named branches match the successor's name exactly; every other kind
    /// takes the first successor regardless of the answer.
    pub fn next_step(&self, step: &Step, user_answer: Option<&str>) -> Option<&Step> {
        match step.kind {
            StepKind::NextStepName => {
                let answer = user_answer?;
                self.successors(step).into_iter().find(|s| s.name == answer)
            }
            _ => self.auto_advance_target(step),
        }
    }

    /// Whether `step` offers no choice but has somewhere to go.
    pub fn should_auto_advance(&self, step: &Step) -> bool {
        self.button_titles(step).is_empty() && !step.next_step_ids.is_empty()
    }

    /// First successor of `step` in sequence order.
    pub fn auto_advance_target(&self, step: &Step) -> Option<&Step> {
        self.successors(step).into_iter().next()
    }
}
