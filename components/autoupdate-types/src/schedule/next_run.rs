use chrono::{DateTime, Duration, FixedOffset};

/// Projection of the next scheduled run based on the last recorded one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NextRun {
    /// The moment the next run is expected.
    pub next_run: DateTime<FixedOffset>,
    /// Indicates that the next run is already due (`next_run <= now`).
    pub overdue: bool,
    /// Hours left until the next run rounded to one decimal place, negative if overdue.
    pub hours_until: f64,
}

impl NextRun {
    /// Projects the next run as `last + interval` relative to `now`.
    pub fn project(
        last: DateTime<FixedOffset>,
        interval_seconds: u64,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let interval = i64::try_from(interval_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let next_run = last.checked_add_signed(interval).unwrap_or(last);

        let seconds_until = (next_run - now).num_seconds() as f64;
        Self {
            next_run,
            overdue: next_run <= now,
            hours_until: (seconds_until / 3600.0 * 10.0).round() / 10.0,
        }
    }
}
