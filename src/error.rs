mod error_kind;

pub use self::error_kind::ErrorKind;
use autoupdate_types::interval::IntervalError;
use std::fmt::{Debug, Display, Formatter};

/// Application specific error that carries the root cause and the kind of the error. Every kind is
/// terminal for the current invocation and is rendered to the user as plain text.
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates an error of the specified kind with a user-facing message.
    pub fn new<M>(kind: ErrorKind, message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow::Error::msg(message),
            kind,
        }
    }

    /// Creates an error of the specified kind that wraps an existing error.
    pub fn with_root_cause(kind: ErrorKind, root_cause: anyhow::Error) -> Self {
        Self { root_cause, kind }
    }

    /// Creates an error for a host that lacks the required platform scheduler.
    pub fn platform_unsupported<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::new(ErrorKind::PlatformUnsupported, message)
    }

    /// Creates an error for an unexpected installation of the managed package.
    pub fn installation_mismatch<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::new(ErrorKind::InstallationMismatch, message)
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<IntervalError> for Error {
    fn from(err: IntervalError) -> Self {
        Self::with_root_cause(ErrorKind::InvalidInterval, err.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(err) => match err.downcast::<IntervalError>() {
                Ok(err) => err.into(),
                Err(err) => Self::with_root_cause(ErrorKind::Unknown, err),
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use anyhow::{anyhow, Context};
    use autoupdate_types::interval::IntervalSpec;

    #[test]
    fn can_be_created_with_kind() {
        let error = Error::platform_unsupported("This tool only works on macOS (requires launchd)");
        assert_eq!(error.kind(), ErrorKind::PlatformUnsupported);
        assert_eq!(
            error.to_string(),
            "This tool only works on macOS (requires launchd)"
        );

        let error = Error::installation_mismatch("Not installed.");
        assert_eq!(error.kind(), ErrorKind::InstallationMismatch);
    }

    #[test]
    fn can_be_recovered_from_anyhow() {
        let error = Error::from(anyhow!(Error::new(
            ErrorKind::SchedulerVerificationFailed,
            "Job failed to start."
        )));
        assert_eq!(error.kind(), ErrorKind::SchedulerVerificationFailed);
        assert_eq!(error.to_string(), "Job failed to start.");

        let error = Error::from(anyhow!(IntervalSpec::parse("30m").unwrap_err()));
        assert_eq!(error.kind(), ErrorKind::InvalidInterval);

        let error = Error::from(anyhow!("Something went wrong."));
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.to_string(), "Something went wrong.");
    }

    #[test]
    fn keeps_context_of_unknown_errors() {
        let error = Error::from(
            Err::<(), _>(anyhow!("Permission denied."))
                .context("Cannot write config.")
                .unwrap_err(),
        );
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.to_string(), "Cannot write config.");
        assert_eq!(
            format!("{error:#}"),
            "Cannot write config.: Permission denied."
        );
    }
}
