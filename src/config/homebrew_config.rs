use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Homebrew package manager.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HomebrewConfig {
    /// Path to the `brew` executable, resolved via `PATH` if relative.
    pub binary: PathBuf,
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("brew"),
        }
    }
}
