use autoupdate_types::JobConfig;

/// Result of the attempt to enable the update job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnableOutcome {
    /// The job was already loaded, nothing has been changed.
    AlreadyEnabled,
    /// The job has been installed and loaded with the specified configuration.
    Enabled(JobConfig),
}
