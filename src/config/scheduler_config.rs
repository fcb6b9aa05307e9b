use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Configuration for the interaction with the platform scheduler.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// How many times to check whether the job is loaded after it has been registered.
    pub verify_attempts: u32,
    /// The delay before every check of whether the job is loaded.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub verify_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            verify_attempts: 5,
            // Default to 500 milliseconds.
            verify_interval: Duration::from_millis(500),
        }
    }
}
