use crate::{
    error::{Error as AutoupdateError, ErrorKind},
    host::PackageManager,
};
use anyhow::{anyhow, bail, Context};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use tracing::debug;

/// Homebrew package manager, the managed package is installed as a cask.
pub struct Homebrew {
    binary: PathBuf,
}

impl Homebrew {
    /// Creates Homebrew package manager that invokes the specified `brew` binary.
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn command<const N: usize>(&self, args: [&str; N]) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(args);
        command
    }

    fn cannot_run(&self) -> String {
        format!("Cannot run `{}`.", self.binary.display())
    }
}

impl PackageManager for Homebrew {
    fn is_package_installed(&self, package: &str) -> anyhow::Result<bool> {
        let status = self
            .command(["list", "--cask", package])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => Ok(status.success()),
            // Missing Homebrew means the package cannot be installed with it.
            Err(err) => {
                debug!("Cannot query Homebrew for `{package}`: {err}");
                Ok(false)
            }
        }
    }

    fn installed_version(&self, package: &str) -> anyhow::Result<Option<String>> {
        let output = self
            .command(["info", "--cask", package])
            .stderr(Stdio::null())
            .output()
            .with_context(|| self.cannot_run())?;
        if !output.status.success() {
            debug!(
                "Cannot retrieve `{package}` version, `brew info` failed ({}).",
                output.status
            );
            return Ok(None);
        }

        parse_cask_version(&String::from_utf8_lossy(&output.stdout), package)
    }

    fn upgrade(&self, package: &str) -> anyhow::Result<()> {
        let status = self
            .command(["upgrade", "--cask", package])
            .status()
            .with_context(|| self.cannot_run())?;
        if !status.success() {
            bail!(AutoupdateError::with_root_cause(
                ErrorKind::PackageManagerFailed,
                anyhow!("Update failed: `brew upgrade --cask {package}` exited with {status}.")
            ));
        }

        Ok(())
    }

    fn cleanup(&self, package: &str) -> anyhow::Result<()> {
        let status = self
            .command(["cleanup", package])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| self.cannot_run())?;
        if !status.success() {
            bail!("`brew cleanup {package}` exited with {status}.");
        }

        Ok(())
    }

    fn prefix(&self) -> anyhow::Result<PathBuf> {
        let output = self
            .command(["--prefix"])
            .stderr(Stdio::null())
            .output()
            .with_context(|| self.cannot_run())?;
        if !output.status.success() {
            bail!("`brew --prefix` exited with {}.", output.status);
        }

        let prefix = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if prefix.is_empty() {
            bail!("`brew --prefix` returned empty prefix.");
        }

        Ok(PathBuf::from(prefix))
    }

    fn executable(&self) -> &Path {
        &self.binary
    }
}

/// Extracts version from the `brew info --cask` output, its first line looks like
/// `==> claude-code: 1.0.17 (auto_updates)`.
fn parse_cask_version(info: &str, package: &str) -> anyhow::Result<Option<String>> {
    let version_regex = Regex::new(&format!(r"{}:\s+(\S+)", regex::escape(package)))?;
    Ok(version_regex
        .captures(info)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str().to_string()))
}
