mod agent_config;
mod autoupdate_paths;
mod homebrew_config;
mod installation_config;
mod raw_config;
mod scheduler_config;

pub use self::{
    agent_config::AgentConfig,
    autoupdate_paths::AutoupdatePaths,
    homebrew_config::HomebrewConfig,
    installation_config::{InstallationConfig, NativeDetection},
    raw_config::RawConfig,
    scheduler_config::SchedulerConfig,
};
use anyhow::anyhow;
use std::{env, path::PathBuf};

/// Main tool config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Home directory all per-user paths are derived from.
    pub home: PathBuf,
    /// Fixed per-user locations of all files the tool manages.
    pub paths: AutoupdatePaths,
    /// Configuration of the managed launch agent.
    pub agent: AgentConfig,
    /// Configuration for the interaction with the platform scheduler.
    pub scheduler: SchedulerConfig,
    /// Configuration for the installation checks.
    pub installation: InstallationConfig,
    /// Configuration for the Homebrew package manager.
    pub homebrew: HomebrewConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        let home = raw_config
            .home
            .or_else(|| env::var_os("HOME").map(PathBuf::from))
            .ok_or_else(|| anyhow!("Cannot determine home directory, set `HOME` variable."))?;

        Ok(Self {
            paths: AutoupdatePaths::new(&home, &raw_config.agent.label),
            home,
            agent: raw_config.agent,
            scheduler: raw_config.scheduler,
            installation: raw_config.installation,
            homebrew: raw_config.homebrew,
        })
    }
}

#[cfg(test)]
pub mod tests {
    use crate::config::{Config, RawConfig};
    use insta::assert_debug_snapshot;
    use std::path::PathBuf;

    #[test]
    fn conversion_from_raw_config() -> anyhow::Result<()> {
        let raw_config = RawConfig {
            home: Some(PathBuf::from("/Users/dev")),
            ..Default::default()
        };

        assert_debug_snapshot!(Config::try_from(raw_config)?, @r###"
        Config {
            home: "/Users/dev",
            paths: AutoupdatePaths {
                descriptor: "/Users/dev/Library/LaunchAgents/com.github.dlgochan.claude-autoupdate.plist",
                script_dir: "/Users/dev/Library/Application Support/claude-autoupdate",
                script: "/Users/dev/Library/Application Support/claude-autoupdate/update.sh",
                config: "/Users/dev/Library/Application Support/claude-autoupdate/config.json",
                log_dir: "/Users/dev/Library/Logs/claude-autoupdate",
                log: "/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log",
            },
            agent: AgentConfig {
                label: "com.github.dlgochan.claude-autoupdate",
                package: "claude-code",
            },
            scheduler: SchedulerConfig {
                verify_attempts: 5,
                verify_interval: 500ms,
            },
            installation: InstallationConfig {
                native_detection: Paths,
            },
            homebrew: HomebrewConfig {
                binary: "brew",
            },
        }
        "###);

        Ok(())
    }
}
