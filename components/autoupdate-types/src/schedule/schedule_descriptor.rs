use crate::schedule::ProcessType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Declarative description of the job registered with the platform scheduler. It's wholly derived
/// from the job configuration and the fixed per-user paths and is never edited by hand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDescriptor {
    /// Unique label of the job within the scheduler.
    pub job_id: String,
    /// Program and its arguments to run.
    pub command: Vec<String>,
    /// Indicates whether the job should run as soon as it's loaded.
    pub run_at_load: bool,
    /// Interval between two consequent runs.
    pub interval_seconds: u64,
    /// File the standard output of the job is appended to.
    pub stdout_path: PathBuf,
    /// File the standard error of the job is appended to.
    pub stderr_path: PathBuf,
    /// Priority class of the job.
    pub priority: ProcessType,
    /// Indicates whether the job runs when the user session starts after boot.
    pub run_on_boot: bool,
    /// Indicates whether disk I/O of the job should be throttled.
    pub low_priority_io: bool,
}
