//! Mood answers offered by `mood` steps.

use serde::{Deserialize, Serialize};

/// Button labels shown for a mood step, best first.
pub const MOOD_LABELS: [&str; 3] = ["Отлично 👍", "Нормально 👌", "Не очень 👎"];

/// Self-reported mood picked from a mood step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Good,
    Neutral,
    Bad,
}

impl Mood {
    /// All moods in button order.
    pub const ALL: [Mood; 3] = [Mood::Good, Mood::Neutral, Mood::Bad];

    /// The button label for this mood.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Good => MOOD_LABELS[0],
            Mood::Neutral => MOOD_LABELS[1],
            Mood::Bad => MOOD_LABELS[2],
        }
    }

    /// Score used for mood statistics.
    pub fn score(&self) -> i32 {
        match self {
            Mood::Good => 1,
            Mood::Neutral => 0,
            Mood::Bad => -1,
        }
    }

    /// Map a button label back to its mood.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mood| mood.label() == label)
    }
}
