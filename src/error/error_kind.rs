/// Describes an application specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Interval provided by the user has invalid format or is out of the allowed range.
    InvalidInterval,
    /// The host doesn't provide the required platform scheduler.
    PlatformUnsupported,
    /// The package isn't installed via the expected package manager, or is already kept up to date
    /// through another mechanism.
    InstallationMismatch,
    /// The platform scheduler refused to register the job.
    SchedulerRegistrationFailed,
    /// The platform scheduler accepted the job, but it was never observed as loaded.
    SchedulerVerificationFailed,
    /// The package manager failed to perform the requested operation.
    PackageManagerFailed,
    /// Unknown error.
    Unknown,
}
