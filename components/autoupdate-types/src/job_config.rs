use crate::interval::IntervalSpec;
use serde::{Deserialize, Serialize};

/// Display form of the interval used when nothing has been configured yet.
pub const DEFAULT_INTERVAL: &str = "24h";

/// Interval (in seconds) used when nothing has been configured yet.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 86_400;

/// The persisted configuration of the managed job. Both fields are always written together and
/// `interval_seconds` is always the value `interval` parses into.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// Interval in the form it was configured, e.g. `12h`.
    pub interval: String,
    /// Interval in seconds.
    pub interval_seconds: u64,
}

impl JobConfig {
    /// Checks that the display and seconds form of the interval agree with each other and returns
    /// the validated interval.
    pub fn interval_spec(&self) -> Option<IntervalSpec> {
        IntervalSpec::parse(&self.interval)
            .ok()
            .filter(|spec| spec.seconds() == self.interval_seconds)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL.to_string(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
        }
    }
}

impl From<IntervalSpec> for JobConfig {
    fn from(spec: IntervalSpec) -> Self {
        Self {
            interval_seconds: spec.seconds(),
            interval: spec.into(),
        }
    }
}
