use std::fmt::{self, Display, Formatter};

/// State of the update job, observed from the platform scheduler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    /// The job is loaded by the scheduler.
    Enabled,
    /// The job isn't loaded, regardless of the files left on disk.
    Disabled,
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("✅ ENABLED"),
            Self::Disabled => f.write_str("❌ DISABLED"),
        }
    }
}
