mod interval_error;

pub use self::interval_error::{IntervalError, RangeViolation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shortest interval between two scheduled runs (1 hour).
pub const MIN_INTERVAL_SECONDS: u64 = 3_600;

/// The longest interval between two scheduled runs (7 days).
pub const MAX_INTERVAL_SECONDS: u64 = 604_800;

const SECONDS_IN_HOUR: u64 = 3_600;
const SECONDS_IN_DAY: u64 = 86_400;

/// A validated interval between two scheduled runs. Can only be constructed through the parser, so
/// `seconds` is always within `[MIN_INTERVAL_SECONDS, MAX_INTERVAL_SECONDS]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct IntervalSpec {
    display: String,
    seconds: u64,
}

impl IntervalSpec {
    /// Parses interval in one of the supported forms: `<digits>h`, `<digits>d` or bare `<digits>`
    /// (seconds). Input is trimmed and matched case-insensitively.
    pub fn parse(input: &str) -> Result<Self, IntervalError> {
        let display = input.trim().to_lowercase();

        let (digits, multiplier) = if let Some(hours) = display.strip_suffix('h') {
            (hours, SECONDS_IN_HOUR)
        } else if let Some(days) = display.strip_suffix('d') {
            (days, SECONDS_IN_DAY)
        } else {
            (display.as_str(), 1)
        };

        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(IntervalError::InvalidFormat {
                input: input.to_string(),
            });
        }

        // Digits that don't fit into `u64` are certainly longer than the maximum interval.
        let seconds = digits
            .parse::<u64>()
            .ok()
            .and_then(|value| value.checked_mul(multiplier))
            .unwrap_or(u64::MAX);

        if seconds < MIN_INTERVAL_SECONDS {
            return Err(IntervalError::OutOfRange {
                input: input.to_string(),
                violation: RangeViolation::TooShort,
            });
        }

        if seconds > MAX_INTERVAL_SECONDS {
            return Err(IntervalError::OutOfRange {
                input: input.to_string(),
                violation: RangeViolation::TooLong,
            });
        }

        Ok(Self { display, seconds })
    }

    /// Canonical display form of the interval, e.g. `12h`.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Interval in seconds.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl TryFrom<String> for IntervalSpec {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IntervalSpec> for String {
    fn from(value: IntervalSpec) -> Self {
        value.display
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Formats number of seconds as `N day(s)`, `N hour(s)` or `N seconds`, whichever unit divides it
/// exactly. Singular is only used for the count of exactly one.
pub fn format_interval(seconds: u64) -> String {
    fn plural(count: u64, unit: &str) -> String {
        if count == 1 {
            format!("{count} {unit}")
        } else {
            format!("{count} {unit}s")
        }
    }

    if seconds % SECONDS_IN_DAY == 0 {
        plural(seconds / SECONDS_IN_DAY, "day")
    } else if seconds % SECONDS_IN_HOUR == 0 {
        plural(seconds / SECONDS_IN_HOUR, "hour")
    } else {
        format!("{seconds} seconds")
    }
}
