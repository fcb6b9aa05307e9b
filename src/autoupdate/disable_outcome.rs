/// Result of the attempt to disable the update job.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisableOutcome {
    /// The job wasn't loaded, nothing has been removed.
    NotEnabled,
    /// The job has been unloaded and its files removed.
    Disabled,
}
