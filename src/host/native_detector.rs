use std::{
    ffi::OsString,
    fs,
    path::{Component, Path, PathBuf},
};
use tracing::debug;

/// Name of the executable installed by the native installer.
const NATIVE_EXECUTABLE: &str = "claude";

/// Detects installations of the managed package made without the package manager. Such
/// installations update themselves and must not be managed by the tool.
pub trait NativeInstallDetector {
    /// Returns location of the native installation for the user with the specified home, if any.
    fn detect(&self, home: &Path) -> Option<PathBuf>;
}

/// Looks for the native installation at the fixed per-user locations the native installer uses.
pub struct FixedPathsDetector;

impl NativeInstallDetector for FixedPathsDetector {
    fn detect(&self, home: &Path) -> Option<PathBuf> {
        let executable = home.join(".local/bin").join(NATIVE_EXECUTABLE);
        if executable.exists() {
            return Some(executable);
        }

        let data_dir = home.join(".local/share").join(NATIVE_EXECUTABLE);
        data_dir.is_dir().then_some(data_dir)
    }
}

/// Resolves the executable through the search path, anything that doesn't belong to the package
/// manager is treated as a native installation.
pub struct PathLookupDetector {
    search_path: Option<OsString>,
    package_manager_prefix: Option<PathBuf>,
}

impl PathLookupDetector {
    pub fn new(search_path: Option<OsString>, package_manager_prefix: Option<PathBuf>) -> Self {
        Self {
            search_path,
            package_manager_prefix,
        }
    }

    fn is_managed_by_package_manager(&self, executable: &Path) -> bool {
        let is_under_prefix = self
            .package_manager_prefix
            .as_ref()
            .is_some_and(|prefix| executable.starts_with(prefix));
        is_under_prefix
            || executable
                .components()
                .any(|component| component == Component::Normal("Caskroom".as_ref()))
    }
}

impl NativeInstallDetector for PathLookupDetector {
    fn detect(&self, home: &Path) -> Option<PathBuf> {
        let executable = match which::which_in(NATIVE_EXECUTABLE, self.search_path.as_ref(), home)
        {
            Ok(executable) => executable,
            Err(err) => {
                debug!("`{NATIVE_EXECUTABLE}` isn't found in the search path: {err}");
                return None;
            }
        };

        // Package manager exposes executables as symlinks into its own tree.
        let resolved = fs::canonicalize(&executable).unwrap_or_else(|_| executable.clone());
        if self.is_managed_by_package_manager(&executable)
            || self.is_managed_by_package_manager(&resolved)
        {
            return None;
        }

        Some(executable)
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedPathsDetector, NativeInstallDetector, PathLookupDetector};
    use std::{fs, os::unix::fs::PermissionsExt, path::Path};

    fn create_executable(path: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, "#!/bin/sh\n")?;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    #[test]
    fn fixed_paths_detect_native_executable() -> anyhow::Result<()> {
        let home = tempfile::tempdir()?;
        assert_eq!(FixedPathsDetector.detect(home.path()), None);

        let executable = home.path().join(".local/bin/claude");
        create_executable(&executable)?;
        assert_eq!(FixedPathsDetector.detect(home.path()), Some(executable));

        Ok(())
    }

    #[test]
    fn fixed_paths_detect_native_data_dir() -> anyhow::Result<()> {
        let home = tempfile::tempdir()?;

        // A regular file at the data dir location isn't a native installation.
        fs::create_dir_all(home.path().join(".local/share"))?;
        fs::write(home.path().join(".local/share/claude"), "")?;
        assert_eq!(FixedPathsDetector.detect(home.path()), None);

        fs::remove_file(home.path().join(".local/share/claude"))?;
        fs::create_dir_all(home.path().join(".local/share/claude/versions"))?;
        assert_eq!(
            FixedPathsDetector.detect(home.path()),
            Some(home.path().join(".local/share/claude"))
        );

        Ok(())
    }

    #[test]
    fn path_lookup_detects_executable_outside_package_manager() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let native_bin = root.path().join("native/bin");
        create_executable(&native_bin.join("claude"))?;

        let detector = PathLookupDetector::new(
            Some(native_bin.clone().into_os_string()),
            Some(root.path().join("homebrew")),
        );
        assert_eq!(
            detector.detect(root.path()),
            Some(native_bin.join("claude"))
        );

        Ok(())
    }

    #[test]
    fn path_lookup_ignores_package_manager_executables() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let prefix = root.path().join("homebrew");
        create_executable(&prefix.join("bin/claude"))?;

        let detector =
            PathLookupDetector::new(Some(prefix.join("bin").into_os_string()), Some(prefix));
        assert_eq!(detector.detect(root.path()), None);

        let caskroom_bin = root.path().join("usr/local/Caskroom/claude-code/1.0.17");
        create_executable(&caskroom_bin.join("claude"))?;
        let detector = PathLookupDetector::new(Some(caskroom_bin.into_os_string()), None);
        assert_eq!(detector.detect(root.path()), None);

        Ok(())
    }

    #[test]
    fn path_lookup_without_executable() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let detector =
            PathLookupDetector::new(Some(root.path().as_os_str().to_os_string()), None);
        assert_eq!(detector.detect(root.path()), None);

        Ok(())
    }
}
