use crate::{
    error::{Error as AutoupdateError, ErrorKind},
    host::JobScheduler,
};
use anyhow::{anyhow, bail, Context};
use autoupdate_types::schedule::ScheduleDescriptor;
use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::debug;

/// Per-user launchd agent scheduler driven through `launchctl`.
pub struct Launchd {
    launchctl: PathBuf,
}

impl Default for Launchd {
    fn default() -> Self {
        Self {
            launchctl: PathBuf::from("launchctl"),
        }
    }
}

impl JobScheduler for Launchd {
    fn is_job_loaded(&self, job_id: &str) -> anyhow::Result<bool> {
        let output = match Command::new(&self.launchctl).arg("list").output() {
            Ok(output) => output,
            // Nothing can be loaded on a host without launchd.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(launchctl = %self.launchctl.display(), "Cannot find launchctl.");
                return Ok(false);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Cannot run `{}`.", self.launchctl.display()));
            }
        };
        if !output.status.success() {
            bail!(
                "`launchctl list` failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(list_contains(&String::from_utf8_lossy(&output.stdout), job_id))
    }

    fn register_job(
        &self,
        descriptor: &ScheduleDescriptor,
        descriptor_path: &Path,
    ) -> anyhow::Result<()> {
        debug!(
            job_id = %descriptor.job_id,
            descriptor = %descriptor_path.display(),
            "Loading launch agent."
        );

        let output = Command::new(&self.launchctl)
            .arg("load")
            .arg(descriptor_path)
            .output()
            .with_context(|| format!("Cannot run `{}`.", self.launchctl.display()))?;
        if !output.status.success() {
            bail!(AutoupdateError::with_root_cause(
                ErrorKind::SchedulerRegistrationFailed,
                anyhow!(
                    "Failed to load LaunchAgent ({}): {}. Check permissions for {}.",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim(),
                    descriptor_path.display()
                )
            ));
        }

        Ok(())
    }

    fn unregister_job(&self, job_id: &str, descriptor_path: &Path) -> anyhow::Result<()> {
        debug!(job_id, descriptor = %descriptor_path.display(), "Unloading launch agent.");

        let output = Command::new(&self.launchctl)
            .arg("unload")
            .arg(descriptor_path)
            .output()
            .with_context(|| format!("Cannot run `{}`.", self.launchctl.display()))?;
        if !output.status.success() {
            bail!(
                "`launchctl unload` failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}

/// Checks whether `launchctl list` output has an entry with exactly the specified label. Every
/// entry line is `PID<tab>Status<tab>Label`.
fn list_contains(output: &str, job_id: &str) -> bool {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(2))
        .any(|label| label == job_id)
}
