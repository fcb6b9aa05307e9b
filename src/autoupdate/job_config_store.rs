use crate::error::Error as AutoupdateError;
use anyhow::Context;
use autoupdate_types::{interval::IntervalSpec, JobConfig};
use figment::{
    providers::{Format, Json, Serialized},
    Figment,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Persists job configuration as a JSON file.
pub struct JobConfigStore {
    path: PathBuf,
}

impl JobConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads job configuration. Missing, unreadable or inconsistent configuration is replaced with
    /// the default one, so the load never fails.
    pub fn load(&self) -> JobConfig {
        let job_config = Figment::from(Serialized::defaults(JobConfig::default()))
            .merge(Json::file(&self.path))
            .extract::<JobConfig>();
        match job_config {
            Ok(job_config) if job_config.interval_spec().is_some() => job_config,
            Ok(job_config) => {
                warn!(
                    path = %self.path.display(),
                    "Job configuration has inconsistent interval ({} and {} seconds), falling back to defaults.",
                    job_config.interval,
                    job_config.interval_seconds
                );
                JobConfig::default()
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "Cannot read job configuration, falling back to defaults: {err}"
                );
                JobConfig::default()
            }
        }
    }

    /// Saves job configuration. The file is replaced atomically, so the readers never see a
    /// partially written configuration.
    pub fn save(&self, job_config: &JobConfig) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}.", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_string_pretty(job_config)?)
            .with_context(|| format!("Cannot write {}.", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Cannot write {}.", self.path.display()))?;

        Ok(())
    }

    /// Parses the interval and persists it. Nothing is written if the interval is invalid.
    pub fn update_interval(&self, input: &str) -> anyhow::Result<IntervalSpec> {
        let spec = IntervalSpec::parse(input).map_err(AutoupdateError::from)?;
        self.save(&JobConfig::from(spec.clone()))?;

        Ok(spec)
    }
}
