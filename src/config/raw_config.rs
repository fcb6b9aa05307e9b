use crate::config::{AgentConfig, HomebrewConfig, InstallationConfig, SchedulerConfig};
use figment::{providers, providers::Format, Figment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    /// Home directory all per-user paths are derived from, defaults to `$HOME`.
    pub home: Option<PathBuf>,
    /// Configuration of the managed launch agent.
    pub agent: AgentConfig,
    /// Configuration for the interaction with the platform scheduler.
    pub scheduler: SchedulerConfig,
    /// Configuration for the installation checks.
    pub installation: InstallationConfig,
    /// Configuration for the Homebrew package manager.
    pub homebrew: HomebrewConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values and
    /// the `CLAUDE_AUTOUPDATE_` prefixed environment variables. The file is optional.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(
            Figment::from(providers::Serialized::defaults(Self::default()))
                .merge(providers::Toml::file(path))
                .merge(providers::Env::prefixed("CLAUDE_AUTOUPDATE_").split("__"))
                .extract()?,
        )
    }
}
