use chrono::{DateTime, FixedOffset};

/// A single recorded start of the scheduled run script, recovered from the log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RunEvent {
    /// The moment the run started.
    pub timestamp: DateTime<FixedOffset>,
}
