//! DateTime display utilities.
//!
//! Timestamps are stored in UTC and shown in the system timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Local wall-clock time of a timestamp as `HH:MM`, the way chat bubbles
/// show it.
pub struct LocalTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_time_is_hours_and_minutes() {
        let ts = Timestamp::from_second(1_640_995_200).unwrap();
        let output = LocalTime(&ts).to_string();
        assert_eq!(output.len(), 5);
        assert_eq!(&output[2..3], ":");
        assert!(output.chars().filter(char::is_ascii_digit).count() == 4);
    }
}
