use autoupdate_types::schedule::start_marker;
use handlebars::Handlebars;
use serde_json::json;
use std::{
    fmt::{self, Display, Formatter},
    path::Path,
};

/// System part of the search path the run script uses, the scheduled job doesn't inherit the
/// user's shell environment.
const SYSTEM_SEARCH_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin";

/// Shell script the scheduled job runs to update the package.
pub struct RunScript<'a> {
    pub package: &'a str,
    pub package_manager: &'a Path,
    pub package_manager_prefix: &'a Path,
}

impl RunScript<'_> {
    /// Renders the script source.
    pub fn render(&self, templates: &Handlebars) -> anyhow::Result<String> {
        let search_path = format!(
            "{}:{SYSTEM_SEARCH_PATH}",
            self.package_manager_prefix.join("bin").display()
        );
        let package_manager = self.package_manager.to_string_lossy();

        Ok(templates.render(
            "update_script.sh",
            &json!({
                "start_marker": ShellWord(&start_marker(self.package)).to_string(),
                "search_path": ShellWord(&search_path).to_string(),
                "brew": ShellWord(&package_manager).to_string(),
                "package": ShellWord(self.package).to_string(),
            }),
        )?)
    }
}

/// Single shell word, quoted only if it contains characters the shell would interpret.
struct ShellWord<'a>(&'a str);

impl Display for ShellWord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let is_safe = !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
        if is_safe {
            f.write_str(self.0)
        } else {
            write!(f, "'{}'", self.0.replace('\'', r"'\''"))
        }
    }
}
