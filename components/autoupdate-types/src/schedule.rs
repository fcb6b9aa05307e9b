mod next_run;
mod process_type;
mod run_event;
mod schedule_descriptor;

pub use self::{
    next_run::NextRun, process_type::ProcessType, run_event::RunEvent,
    schedule_descriptor::ScheduleDescriptor,
};

/// Text that the generated run script logs at the beginning of every run, and that run history is
/// recovered from: `[<timestamp>] Starting <package> update check...`.
pub fn start_marker(package: &str) -> String {
    format!("Starting {package} update check")
}

#[cfg(test)]
mod tests {
    use super::start_marker;

    #[test]
    fn builds_start_marker() {
        assert_eq!(
            start_marker("claude-code"),
            "Starting claude-code update check"
        );
    }
}
