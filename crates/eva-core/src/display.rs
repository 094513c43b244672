//! Markdown formatting for the chat and its scripts.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and choices go through newtype wrappers.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Messages, Buttons)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{Buttons, Messages};
pub use datetime::LocalTime;
pub use status::OperationStatus;
