use crate::config::AutoupdatePaths;
use autoupdate_types::{
    schedule::{ProcessType, ScheduleDescriptor},
    JobConfig,
};
use handlebars::Handlebars;

/// Shell the run script is executed with.
const SHELL: &str = "/bin/bash";

/// Builds descriptor of the update job from the job configuration and the per-user paths.
pub fn build_descriptor(
    job_config: &JobConfig,
    label: &str,
    paths: &AutoupdatePaths,
) -> ScheduleDescriptor {
    ScheduleDescriptor {
        job_id: label.to_string(),
        command: vec![SHELL.to_string(), paths.script.to_string_lossy().into_owned()],
        run_at_load: true,
        interval_seconds: job_config.interval_seconds,
        stdout_path: paths.log.clone(),
        stderr_path: paths.log.clone(),
        priority: ProcessType::Background,
        run_on_boot: true,
        low_priority_io: true,
    }
}

/// Renders descriptor as a launchd property list.
pub fn render_descriptor(
    templates: &Handlebars,
    descriptor: &ScheduleDescriptor,
) -> anyhow::Result<String> {
    Ok(templates.render("launch_agent.plist", descriptor)?)
}

#[cfg(test)]
mod tests {
    use super::{build_descriptor, render_descriptor};
    use crate::{config::AutoupdatePaths, templates::create_templates};
    use autoupdate_types::{interval::IntervalSpec, JobConfig};
    use insta::{assert_debug_snapshot, assert_snapshot};
    use std::path::Path;

    const LABEL: &str = "com.github.dlgochan.claude-autoupdate";

    #[test]
    fn builds_descriptor() -> anyhow::Result<()> {
        let paths = AutoupdatePaths::new(Path::new("/Users/dev"), LABEL);
        let job_config = JobConfig::from(IntervalSpec::parse("6h")?);

        assert_debug_snapshot!(build_descriptor(&job_config, LABEL, &paths), @r###"
        ScheduleDescriptor {
            job_id: "com.github.dlgochan.claude-autoupdate",
            command: [
                "/bin/bash",
                "/Users/dev/Library/Application Support/claude-autoupdate/update.sh",
            ],
            run_at_load: true,
            interval_seconds: 21600,
            stdout_path: "/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log",
            stderr_path: "/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log",
            priority: Background,
            run_on_boot: true,
            low_priority_io: true,
        }
        "###);

        Ok(())
    }

    #[test]
    fn renders_property_list() -> anyhow::Result<()> {
        let paths = AutoupdatePaths::new(Path::new("/Users/dev"), LABEL);
        let descriptor = build_descriptor(&JobConfig::default(), LABEL, &paths);

        let property_list = render_descriptor(&create_templates()?, &descriptor)?;
        let lines = property_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        assert_snapshot!(lines, @r###"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
        <plist version="1.0">
        <dict>
        <key>Label</key>
        <string>com.github.dlgochan.claude-autoupdate</string>
        <key>ProgramArguments</key>
        <array>
        <string>/bin/bash</string>
        <string>/Users/dev/Library/Application Support/claude-autoupdate/update.sh</string>
        </array>
        <key>RunAtLoad</key>
        <true/>
        <key>StartInterval</key>
        <integer>86400</integer>
        <key>StandardOutPath</key>
        <string>/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log</string>
        <key>StandardErrorPath</key>
        <string>/Users/dev/Library/Logs/claude-autoupdate/claude-autoupdate.log</string>
        <key>LowPriorityBackgroundIO</key>
        <true/>
        <key>ProcessType</key>
        <string>Background</string>
        </dict>
        </plist>
        "###);

        Ok(())
    }

    #[test]
    fn escapes_property_list_values() -> anyhow::Result<()> {
        let paths = AutoupdatePaths::new(Path::new("/Users/R&D <dev>"), LABEL);
        let descriptor = build_descriptor(&JobConfig::default(), LABEL, &paths);

        let property_list = render_descriptor(&create_templates()?, &descriptor)?;
        assert!(property_list.contains("/Users/R&amp;D &lt;dev&gt;/Library/Logs"));
        assert!(!property_list.contains("R&D"));

        Ok(())
    }
}
