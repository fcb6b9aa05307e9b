/// Result of the immediate package upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Installed version changed.
    Updated { from: Option<String>, to: String },
    /// Installed version is the latest one.
    AlreadyCurrent(String),
    /// Upgrade succeeded, but the installed version cannot be determined.
    Unavailable,
}

impl UpdateOutcome {
    /// Compares package versions before and after the upgrade.
    pub fn compare(before: Option<String>, after: Option<String>) -> Self {
        match after {
            Some(after) if before.as_deref() == Some(after.as_str()) => Self::AlreadyCurrent(after),
            Some(after) => Self::Updated {
                from: before,
                to: after,
            },
            None => Self::Unavailable,
        }
    }
}
