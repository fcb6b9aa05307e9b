mod homebrew;
mod launchd;
mod native_detector;

pub use self::{
    homebrew::Homebrew,
    launchd::Launchd,
    native_detector::{FixedPathsDetector, NativeInstallDetector, PathLookupDetector},
};
use crate::config::{Config, NativeDetection};
use autoupdate_types::schedule::ScheduleDescriptor;
use std::{env, path::Path, path::PathBuf};

/// Per-user platform scheduler that loads and unloads job descriptors.
pub trait JobScheduler {
    /// Checks whether the job with the specified ID is currently loaded.
    fn is_job_loaded(&self, job_id: &str) -> anyhow::Result<bool>;

    /// Registers the job described by the descriptor already written to `descriptor_path`.
    fn register_job(
        &self,
        descriptor: &ScheduleDescriptor,
        descriptor_path: &Path,
    ) -> anyhow::Result<()>;

    /// Unregisters the job with the specified ID.
    fn unregister_job(&self, job_id: &str, descriptor_path: &Path) -> anyhow::Result<()>;
}

/// Package manager the managed package is installed with.
pub trait PackageManager {
    /// Checks whether the package is installed with this package manager.
    fn is_package_installed(&self, package: &str) -> anyhow::Result<bool>;

    /// Retrieves currently installed version of the package, if it can be determined.
    fn installed_version(&self, package: &str) -> anyhow::Result<Option<String>>;

    /// Upgrades the package, streaming the package manager output to the user.
    fn upgrade(&self, package: &str) -> anyhow::Result<()>;

    /// Removes outdated downloads and versions of the package.
    fn cleanup(&self, package: &str) -> anyhow::Result<()>;

    /// Returns the installation prefix of the package manager.
    fn prefix(&self) -> anyhow::Result<PathBuf>;

    /// Returns the executable of the package manager to invoke from the generated run script.
    fn executable(&self) -> &Path;
}

/// Collaborators the tool interacts with on the host.
pub struct Host<JS: JobScheduler, PM: PackageManager> {
    /// Name of the host operating system, as in `std::env::consts::OS`.
    pub os: &'static str,
    pub scheduler: JS,
    pub package_manager: PM,
    pub native_detector: Box<dyn NativeInstallDetector>,
}

impl Host<Launchd, Homebrew> {
    /// Creates host collaborators for the current macOS user.
    pub fn from_config(config: &Config) -> Self {
        let package_manager = Homebrew::new(config.homebrew.binary.clone());
        let native_detector: Box<dyn NativeInstallDetector> =
            match config.installation.native_detection {
                NativeDetection::Paths => Box::new(FixedPathsDetector),
                NativeDetection::PathLookup => Box::new(PathLookupDetector::new(
                    env::var_os("PATH"),
                    package_manager.prefix().ok(),
                )),
            };

        Self {
            os: env::consts::OS,
            scheduler: Launchd::default(),
            package_manager,
            native_detector,
        }
    }
}
