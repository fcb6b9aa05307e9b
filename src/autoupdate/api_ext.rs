use crate::{
    api::Api,
    autoupdate::{
        build_descriptor, render_descriptor, DisableOutcome, EnableOutcome, JobConfigStore,
        LifecycleState, RunHistory, RunScript, UpdateOutcome,
    },
    error::{Error as AutoupdateError, ErrorKind},
    host::{JobScheduler, PackageManager},
};
use anyhow::{bail, Context};
use autoupdate_types::{interval::format_interval, schedule::NextRun, JobConfig};
use chrono::{DateTime, FixedOffset};
use std::{
    fs,
    io::Write,
    os::unix::fs::PermissionsExt,
    path::Path,
    thread,
};
use tracing::{debug, info, warn};

/// Name the tool is invoked with, used in the follow-up hints.
const CLI_NAME: &str = env!("CARGO_PKG_NAME");

/// Permissions of the generated run script.
const SCRIPT_MODE: u32 = 0o755;

/// Timestamp format used in the user-facing reports.
const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle of the update job: all user-facing actions of the tool.
pub struct AutoupdateApiExt<'a, JS: JobScheduler, PM: PackageManager> {
    api: &'a Api<JS, PM>,
}

impl<'a, JS: JobScheduler, PM: PackageManager> AutoupdateApiExt<'a, JS, PM> {
    /// Creates Autoupdate API.
    pub fn new(api: &'a Api<JS, PM>) -> Self {
        Self { api }
    }

    fn job_config_store(&self) -> JobConfigStore {
        JobConfigStore::new(&self.api.config.paths.config)
    }

    fn package(&self) -> &str {
        &self.api.config.agent.package
    }

    /// Queries the scheduler for the current state of the job.
    pub fn state(&self) -> anyhow::Result<LifecycleState> {
        let is_loaded = self
            .api
            .host
            .scheduler
            .is_job_loaded(&self.api.config.agent.label)?;
        Ok(if is_loaded {
            LifecycleState::Enabled
        } else {
            LifecycleState::Disabled
        })
    }

    /// Makes sure the host and the package installation can be managed by the tool.
    pub fn validate(&self) -> anyhow::Result<()> {
        let host = &self.api.host;
        if host.os != "macos" {
            bail!(AutoupdateError::platform_unsupported(
                "This tool only works on macOS (requires launchd)."
            ));
        }

        let package = self.package();
        if let Some(native_installation) = host.native_detector.detect(&self.api.config.home) {
            bail!(AutoupdateError::installation_mismatch(format!(
                "Native installation of {package} detected at {}.\nNative installations update themselves automatically, auto-updates via Homebrew are not needed.\nRun `claude doctor` to check the installation.",
                native_installation.display()
            )));
        }

        if !host.package_manager.is_package_installed(package)? {
            bail!(AutoupdateError::installation_mismatch(format!(
                "{package} is not installed via Homebrew.\nInstall first: brew install --cask {package}"
            )));
        }

        Ok(())
    }

    /// Installs and loads the update job. If the interval is specified, it's persisted before
    /// anything else is changed.
    pub fn enable(
        &self,
        interval: Option<&str>,
        out: &mut impl Write,
    ) -> anyhow::Result<EnableOutcome> {
        let package = self.package();
        if self.state()? == LifecycleState::Enabled {
            writeln!(out, "Auto-updates already enabled for {package}!")?;
            writeln!(out, "Run '{CLI_NAME} status' for details.")?;
            return Ok(EnableOutcome::AlreadyEnabled);
        }

        let store = self.job_config_store();
        let job_config = match interval {
            Some(interval) => {
                let spec = store.update_interval(interval)?;
                writeln!(out, "Using custom interval: {spec}")?;
                JobConfig::from(spec)
            }
            None => {
                let job_config = store.load();
                store.save(&job_config)?;
                job_config
            }
        };

        writeln!(out, "Setting up auto-updates for {package}...\n")?;

        let paths = &self.api.config.paths;
        for dir in [
            paths.script_dir.as_path(),
            paths.log_dir.as_path(),
            paths.descriptor_dir(),
        ] {
            fs::create_dir_all(dir).with_context(|| format!("Cannot create {}.", dir.display()))?;
        }

        let package_manager = &self.api.host.package_manager;
        let script = RunScript {
            package,
            package_manager: package_manager.executable(),
            package_manager_prefix: &package_manager.prefix()?,
        }
        .render(&self.api.templates)?;
        write_file(&paths.script, &script)?;
        fs::set_permissions(&paths.script, fs::Permissions::from_mode(SCRIPT_MODE))
            .with_context(|| format!("Cannot make {} executable.", paths.script.display()))?;
        writeln!(out, "✓ Created update script at {}", paths.script.display())?;

        let label = &self.api.config.agent.label;
        let descriptor = build_descriptor(&job_config, label, paths);
        write_file(
            &paths.descriptor,
            &render_descriptor(&self.api.templates, &descriptor)?,
        )?;
        writeln!(out, "✓ Created LaunchAgent at {}", paths.descriptor.display())?;

        self.api
            .host
            .scheduler
            .register_job(&descriptor, &paths.descriptor)
            .map_err(|err| match err.downcast::<AutoupdateError>() {
                Ok(err) => err,
                Err(err) => {
                    AutoupdateError::with_root_cause(ErrorKind::SchedulerRegistrationFailed, err)
                }
            })?;
        writeln!(out, "✓ Loaded LaunchAgent")?;

        self.verify_loaded()?;
        writeln!(out, "✓ Verified LaunchAgent is running\n")?;

        writeln!(out, "🎉 Auto-updates enabled for {package}!\n")?;
        writeln!(out, "What happens now:")?;
        writeln!(
            out,
            "  • Updates run every {}",
            format_interval(job_config.interval_seconds)
        )?;
        writeln!(out, "  • Updates run at system boot")?;
        writeln!(out, "  • Updates run in the background (low priority)\n")?;
        writeln!(out, "Commands:")?;
        writeln!(out, "  {CLI_NAME} status   # Check status")?;
        writeln!(out, "  {CLI_NAME} update   # Update now")?;
        writeln!(out, "  {CLI_NAME} config   # Show configuration")?;
        writeln!(out, "  {CLI_NAME} disable  # Disable auto-updates\n")?;
        writeln!(out, "Logs: {}", paths.log.display())?;

        Ok(EnableOutcome::Enabled(job_config))
    }

    /// Waits until the scheduler reports the job as loaded.
    fn verify_loaded(&self) -> anyhow::Result<()> {
        let scheduler_config = &self.api.config.scheduler;
        let label = &self.api.config.agent.label;
        for attempt in 1..=scheduler_config.verify_attempts.max(1) {
            thread::sleep(scheduler_config.verify_interval);
            if self.api.host.scheduler.is_job_loaded(label)? {
                return Ok(());
            }

            debug!(
                job.label = %label,
                "Job isn't loaded yet (attempt {attempt}, waited {} since previous attempt).",
                humantime::format_duration(scheduler_config.verify_interval)
            );
        }

        bail!(AutoupdateError::new(
            ErrorKind::SchedulerVerificationFailed,
            format!(
                "LaunchAgent failed to start. Check logs at {}",
                self.api.config.paths.log.display()
            )
        ))
    }

    /// Unloads the update job and removes everything it was installed with except for the log.
    pub fn disable(&self, out: &mut impl Write) -> anyhow::Result<DisableOutcome> {
        let package = self.package();
        if self.state()? == LifecycleState::Disabled {
            writeln!(out, "Auto-updates are not enabled. Nothing to disable.")?;
            return Ok(DisableOutcome::NotEnabled);
        }

        writeln!(out, "Disabling auto-updates for {package}...\n")?;

        let paths = &self.api.config.paths;
        let label = &self.api.config.agent.label;
        match self
            .api
            .host
            .scheduler
            .unregister_job(label, &paths.descriptor)
        {
            Ok(()) => writeln!(out, "✓ Stopped LaunchAgent")?,
            Err(err) => {
                warn!(job.label = %label, "Cannot unload job: {err:#}");
                writeln!(out, "⚠ Failed to unload LaunchAgent (may not be running)")?;
            }
        }

        if paths.descriptor.exists() {
            fs::remove_file(&paths.descriptor)
                .with_context(|| format!("Cannot remove {}.", paths.descriptor.display()))?;
            writeln!(out, "✓ Removed LaunchAgent plist")?;
        }

        if paths.script_dir.exists() {
            fs::remove_dir_all(&paths.script_dir)
                .with_context(|| format!("Cannot remove {}.", paths.script_dir.display()))?;
            writeln!(out, "✓ Removed scripts and config")?;
        }

        if paths.log.exists() {
            writeln!(out, "✓ Logs preserved at {}", paths.log.display())?;
        }

        info!(job.label = %label, "Auto-updates disabled.");
        writeln!(
            out,
            "\nAuto-updates disabled. To re-enable: {CLI_NAME} enable"
        )?;

        Ok(DisableOutcome::Disabled)
    }

    /// Reports state of the update job together with its last and next run.
    pub fn status(
        &self,
        now: DateTime<FixedOffset>,
        out: &mut impl Write,
    ) -> anyhow::Result<LifecycleState> {
        let state = self.state()?;
        writeln!(out, "Status: {state}\n")?;
        if state == LifecycleState::Disabled {
            writeln!(out, "Auto-updates are not enabled.")?;
            writeln!(out, "Run '{CLI_NAME} enable' to enable.")?;
            return Ok(state);
        }

        let job_config = self.job_config_store().load();
        let interval = format_interval(job_config.interval_seconds);
        writeln!(out, "Configuration:")?;
        writeln!(
            out,
            "  Interval: {interval} ({} seconds)",
            job_config.interval_seconds
        )?;
        writeln!(out, "  Runs at boot: Yes")?;
        writeln!(out, "  Priority: Low (background)\n")?;

        let paths = &self.api.config.paths;
        match RunHistory::new(self.package())?.last_run_in_file(&paths.log) {
            Some(last_run) => {
                writeln!(
                    out,
                    "Last run: {}",
                    last_run.timestamp.format(REPORT_TIMESTAMP_FORMAT)
                )?;

                let next_run =
                    NextRun::project(last_run.timestamp, job_config.interval_seconds, now);
                if next_run.overdue {
                    writeln!(out, "Next run: Soon (overdue)")?;
                } else {
                    writeln!(
                        out,
                        "Next run: {} (in ~{:.1} hours)",
                        next_run.next_run.format(REPORT_TIMESTAMP_FORMAT),
                        next_run.hours_until
                    )?;
                }
            }
            None => {
                writeln!(
                    out,
                    "Last run: Never (will run at next boot or in {interval})"
                )?;
                writeln!(out, "Next run: At system boot or within {interval}")?;
            }
        }

        writeln!(out, "\nFiles:")?;
        writeln!(out, "  LaunchAgent: {}", paths.descriptor.display())?;
        writeln!(out, "  Script: {}", paths.script.display())?;
        writeln!(out, "  Log: {}", paths.log.display())?;

        Ok(state)
    }

    /// Upgrades the package right away, regardless of the job state.
    pub fn update(&self, out: &mut impl Write) -> anyhow::Result<UpdateOutcome> {
        let package = self.package();
        let package_manager = &self.api.host.package_manager;

        writeln!(out, "Updating {package} now...\n")?;
        let before = self.installed_version();
        if let Some(ref version) = before {
            writeln!(out, "Current version: {version}")?;
        }
        writeln!(out, "Running: brew upgrade --cask {package}\n")?;
        // Package manager writes to the same stream directly.
        out.flush()?;

        if let Err(err) = package_manager.upgrade(package) {
            self.cleanup(out)?;
            return Err(match err.downcast::<AutoupdateError>() {
                Ok(err) => err,
                Err(err) => AutoupdateError::with_root_cause(ErrorKind::PackageManagerFailed, err),
            }
            .into());
        }

        let outcome = UpdateOutcome::compare(before, self.installed_version());
        writeln!(out)?;
        match &outcome {
            UpdateOutcome::Updated {
                from: Some(from),
                to,
            } => writeln!(out, "✅ Updated to version {to} (from {from})")?,
            UpdateOutcome::Updated { from: None, to } => {
                writeln!(out, "✅ Updated to version {to}")?
            }
            UpdateOutcome::AlreadyCurrent(version) => {
                writeln!(out, "✅ Already up to date ({version})")?
            }
            UpdateOutcome::Unavailable => writeln!(out, "✅ Update complete")?,
        }

        self.cleanup(out)?;

        Ok(outcome)
    }

    fn installed_version(&self) -> Option<String> {
        let package = self.package();
        self.api
            .host
            .package_manager
            .installed_version(package)
            .unwrap_or_else(|err| {
                warn!("Cannot retrieve installed version of {package}: {err:#}");
                None
            })
    }

    /// Removes outdated package downloads, failures don't affect the result of the update.
    fn cleanup(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let package = self.package();
        writeln!(out, "\nCleaning up...")?;
        match self.api.host.package_manager.cleanup(package) {
            Ok(()) => writeln!(out, "✓ Cleanup complete")?,
            Err(err) => {
                warn!("Cannot clean up {package}: {err:#}");
                writeln!(out, "⚠ Cleanup failed, ignoring")?;
            }
        }

        Ok(())
    }

    /// Reports the persisted job configuration and what can be done with it next.
    pub fn show_config(&self, out: &mut impl Write) -> anyhow::Result<LifecycleState> {
        let store = self.job_config_store();
        let job_config = store.load();

        writeln!(out, "Configuration:")?;
        writeln!(
            out,
            "  Update interval: {} ({})",
            job_config.interval,
            format_interval(job_config.interval_seconds)
        )?;
        writeln!(out, "  Interval (seconds): {}\n", job_config.interval_seconds)?;
        writeln!(out, "  Config file: {}\n", store.path().display())?;

        let state = self.state()?;
        writeln!(out, "Status: {state}\n")?;
        match state {
            LifecycleState::Enabled => {
                writeln!(out, "To change interval:")?;
                writeln!(out, "  1. Disable: {CLI_NAME} disable")?;
                writeln!(
                    out,
                    "  2. Re-enable with new interval: {CLI_NAME} enable --interval 12h"
                )?;
            }
            LifecycleState::Disabled => {
                writeln!(out, "To enable with custom interval:")?;
                writeln!(out, "  {CLI_NAME} enable --interval 12h")?;
            }
        }

        Ok(state)
    }
}

/// Replaces the file content, the file is removed first so that stale permissions don't survive.
fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Cannot remove {}.", path.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Cannot write {}.", path.display()))
}

impl<JS: JobScheduler, PM: PackageManager> Api<JS, PM> {
    /// Returns an API to manage the update job.
    pub fn autoupdate(&self) -> AutoupdateApiExt<'_, JS, PM> {
        AutoupdateApiExt::new(self)
    }
}
