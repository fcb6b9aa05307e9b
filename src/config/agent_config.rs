use serde::{Deserialize, Serialize};

/// Configuration of the managed launch agent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Label that uniquely identifies the job within the platform scheduler.
    pub label: String,
    /// Name of the Homebrew cask that is kept up to date.
    pub package: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            label: "com.github.dlgochan.claude-autoupdate".to_string(),
            package: "claude-code".to_string(),
        }
    }
}
