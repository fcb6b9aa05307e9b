use std::path::{Path, PathBuf};

/// Name of the per-user directories that hold the files of the tool.
const APP_DIR_NAME: &str = "claude-autoupdate";

/// Fixed per-user locations of all files the tool manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoupdatePaths {
    /// Launch agent property list registered with the scheduler.
    pub descriptor: PathBuf,
    /// Directory with the generated run script and the persisted job config.
    pub script_dir: PathBuf,
    /// Generated run script.
    pub script: PathBuf,
    /// Persisted job config.
    pub config: PathBuf,
    /// Directory with the log file, preserved when the job is disabled.
    pub log_dir: PathBuf,
    /// Log file both output streams of the job are appended to.
    pub log: PathBuf,
}

impl AutoupdatePaths {
    /// Derives all paths from the user home directory and the job label.
    pub fn new(home: &Path, label: &str) -> Self {
        let library = home.join("Library");
        let script_dir = library.join("Application Support").join(APP_DIR_NAME);
        let log_dir = library.join("Logs").join(APP_DIR_NAME);

        Self {
            descriptor: library
                .join("LaunchAgents")
                .join(format!("{label}.plist")),
            script: script_dir.join("update.sh"),
            config: script_dir.join("config.json"),
            log: log_dir.join(format!("{APP_DIR_NAME}.log")),
            script_dir,
            log_dir,
        }
    }

    /// Directory the launch agent property list lives in.
    pub fn descriptor_dir(&self) -> &Path {
        self.descriptor.parent().unwrap_or(Path::new("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::AutoupdatePaths;
    use insta::assert_debug_snapshot;
    use std::path::Path;

    #[test]
    fn derives_paths_from_home_and_label() {
        let paths = AutoupdatePaths::new(Path::new("/Users/dev"), "com.example.autoupdate");
        assert_debug_snapshot!(paths, @r###"
        AutoupdatePaths {
            descriptor: "/Users/dev/Library/LaunchAgents/com.example.autoupdate.plist",
            script_dir: "/Users/dev/Library/Application Support/claude-autoupdate",
            script: "/Users/dev/Library/Application Support/claude-autoupdate/update.sh",
            config: "/Users/dev/Library/Application Support/claude-autoupdate/config.json",
            log_dir: "/Users/dev/Library/Logs/claude-autoupdate",
            log: "/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log",
        }
        "###);
        assert_eq!(
            paths.descriptor_dir(),
            Path::new("/Users/dev/Library/LaunchAgents")
        );
    }
}
