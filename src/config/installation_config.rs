use serde::{Deserialize, Serialize};

/// Heuristic used to detect a native (self-updating) installation of the package.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NativeDetection {
    /// Native installation is detected by its well-known files in the home directory.
    #[default]
    Paths,
    /// Native installation is detected by resolving the executable on `PATH`.
    PathLookup,
}

/// Configuration for the installation checks.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallationConfig {
    /// Heuristic used to detect a native installation.
    pub native_detection: NativeDetection,
}
