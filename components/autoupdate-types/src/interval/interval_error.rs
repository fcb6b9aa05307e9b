use std::fmt;
use thiserror::Error;

/// Describes which bound of the allowed interval range was violated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RangeViolation {
    /// Interval is shorter than 1 hour.
    TooShort,
    /// Interval is longer than 7 days.
    TooLong,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("too short"),
            Self::TooLong => f.write_str("too long"),
        }
    }
}

/// Error returned when interval string cannot be turned into a valid `IntervalSpec`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error(
        "Invalid interval format: {input}. Use format like: 6h, 12h, 24h, 1d, 2d (hours, days, or raw seconds)."
    )]
    InvalidFormat { input: String },
    #[error("Interval {violation}: {input}. {}", bound_hint(.violation))]
    OutOfRange {
        input: String,
        violation: RangeViolation,
    },
}

fn bound_hint(violation: &RangeViolation) -> &'static str {
    match violation {
        RangeViolation::TooShort => "Minimum is 1h (1 hour).",
        RangeViolation::TooLong => "Maximum is 7d (7 days).",
    }
}
