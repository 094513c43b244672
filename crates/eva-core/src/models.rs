//! Data models for scripts, steps and messages.
//!
//! This module contains the domain models of the dialogue engine. Display
//! implementations for these models live in [`crate::display`] so the data
//! structures stay free of presentation logic.
//!
//! # Model Overview
//!
//! - [`Script`]: a dialogue graph with its run state and the graph queries
//!   used by the engine (`sorted_steps`, `button_titles`, `next_step`, ...)
//! - [`Step`]: one node of the graph with its interaction type and edges
//! - [`Message`]: one line of the chat log
//! - [`StepState`], [`StepKind`], [`ScriptState`]: persisted enums with
//!   lenient decoding
//! - [`Mood`]: answers offered by mood steps
//!
//! # Examples
//!
//! ```rust
//! use eva_core::models::{Script, ScriptState, Step, StepKind, StepState};
//!
//! let script = Script::new(1, "Intro", ScriptState::Running, true).with_steps(vec![
//!     Step::new(1, "Hi", "<p>Hi</p>", 0, StepState::NotRunning, StepKind::NextStepName, vec![2]),
//!     Step::new(2, "Who are you?", "<p>I am Eva</p>", 1, StepState::NotRunning, StepKind::Nothing, vec![]),
//! ]);
//!
//! let first = script.next_pending_step().unwrap();
//! assert_eq!(script.button_titles(first), vec!["Who are you?".to_string()]);
//! ```

pub mod message;
pub mod mood;
pub mod script;
pub mod status;
pub mod step;


pub use message::{Message, ASSISTANT_AUTHOR, USER_AUTHOR};
pub use mood::{Mood, MOOD_LABELS};
pub use script::{Script, ScriptId};
pub use status::{ScriptState, StepKind, StepState};
pub use step::{Step, StepId};
