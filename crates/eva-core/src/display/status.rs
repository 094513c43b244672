//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Session reset");
        assert_eq!(format!("{success}"), "Success: Session reset\n");

        let failure = OperationStatus::failure("Session is closed");
        assert!(format!("{failure}").starts_with("Error:"));
    }
}
