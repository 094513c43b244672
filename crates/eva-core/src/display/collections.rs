//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::Message;

/// Newtype wrapper for displaying a chat history.
///
/// # Examples
///
/// ```rust
/// use eva_core::{display::Messages, models::Message};
/// use jiff::Timestamp;
///
/// let messages = Messages(vec![Message::new(1, "Привет 👋", false, Timestamp::now())]);
/// let output = format!("{messages}");
/// assert!(output.contains("**Eva**"));
/// assert!(output.contains("Привет 👋"));
/// ```
pub struct Messages(pub Vec<Message>);

impl Messages {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of messages in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

impl Index<usize> for Messages {
    type Output = Message;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No messages yet.")
        } else {
            for message in &self.0 {
                write!(f, "{message}")?;
            }
            Ok(())
        }
    }
}

/// Numbered list of the choices Eva offers.
///
/// ```rust
/// use eva_core::display::Buttons;
///
/// let buttons = Buttons(vec!["Поехали 🧑‍🚀".to_string()]);
/// assert_eq!(buttons.to_string(), "1. Поехали 🧑‍🚀\n");
/// assert_eq!(buttons.resolve("1"), "Поехали 🧑‍🚀");
/// assert_eq!(buttons.resolve("2"), "2");
/// ```
pub struct Buttons(pub Vec<String>);

impl Buttons {
    /// Check if no choice is offered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map a 1-based choice number to its label. Anything else is returned
    /// unchanged.
    pub fn resolve<'a>(&'a self, input: &'a str) -> &'a str {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.0.get(index))
            .map_or(input, String::as_str)
    }
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, label) in self.0.iter().enumerate() {
            writeln!(f, "{}. {label}", index + 1)?;
        }
        Ok(())
    }
}
