use autoupdate_types::schedule::{start_marker, RunEvent};
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind as IoErrorKind},
    path::Path,
};
use tracing::{debug, warn};

/// Formats of `date` output with the zone abbreviation already removed.
const DATE_FORMATS: [&str; 2] = ["%a %b %d %H:%M:%S %Y", "%a %b %d %H:%M:%S %z %Y"];

/// Formats of the timestamps without any zone information.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Recovers history of the scheduled runs from the log the run script appends to.
pub struct RunHistory {
    start_line: Regex,
}

impl RunHistory {
    /// Creates history reader for runs that update the specified package.
    pub fn new(package: &str) -> anyhow::Result<Self> {
        Ok(Self {
            start_line: Regex::new(&format!(
                r"^\[(?P<timestamp>[^\]]+)\]\s+{}",
                regex::escape(&start_marker(package))
            ))?,
        })
    }

    /// Returns the most recent run recorded in the log file. Missing or unreadable log means
    /// there were no runs yet.
    pub fn last_run_in_file(&self, path: &Path) -> Option<RunEvent> {
        match File::open(path) {
            Ok(file) => self.last_run(BufReader::new(file)),
            Err(err) if err.kind() == IoErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), "Cannot open run log: {err}");
                None
            }
        }
    }

    /// Returns the most recent run recorded in the log. Only complete lines are considered, since
    /// the last line may still be being written by the running script.
    pub fn last_run(&self, mut reader: impl BufRead) -> Option<RunEvent> {
        let mut last_run = None;
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) if line.ends_with(b"\n") => {
                    if let Some(run) = self.parse_line(&String::from_utf8_lossy(&line)) {
                        last_run = Some(run);
                    }
                }
                Ok(_) => {
                    debug!("Skipping incomplete last line of the run log.");
                    break;
                }
                Err(err) => {
                    warn!("Cannot read run log, the history may be incomplete: {err}");
                    break;
                }
            }
        }

        last_run
    }

    /// Parses a single log line, returns `None` if it doesn't record a start of the run.
    pub fn parse_line(&self, line: &str) -> Option<RunEvent> {
        let captures = self.start_line.captures(line)?;
        let timestamp = &captures["timestamp"];
        match parse_timestamp(timestamp) {
            Some(timestamp) => Some(RunEvent { timestamp }),
            None => {
                debug!("Skipping run log line with unrecognized timestamp `{timestamp}`.");
                None
            }
        }
    }
}

/// Parses timestamp written by the run script. The default `date` output is expected, but ISO
/// and RFC formats are recognized too. Zone abbreviations other than UTC/GMT are ambiguous, such
/// timestamps are interpreted in the local time zone. Zones without an abbreviation are printed by
/// `date` as a numeric offset (`+04`, `-0330`) and are honored.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(value) {
        return Some(timestamp);
    }

    // `date` pads single digit days with an extra space.
    let mut tokens = value
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut is_utc = false;
    if tokens.len() == 6 {
        if tokens[4].chars().all(|c| c.is_ascii_alphabetic()) {
            is_utc = matches!(tokens[4].to_ascii_uppercase().as_str(), "UTC" | "GMT" | "Z");
            tokens.remove(4);
        } else {
            tokens[4] = normalize_offset(&tokens[4])?;
        }
    }
    let year = date_year(&tokens);
    let normalized = tokens.join(" ");

    for format in DATE_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(&normalized, format) {
            return Some(timestamp).filter(|timestamp| Some(timestamp.year()) == year);
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return from_naive(naive, is_utc).filter(|timestamp| Some(timestamp.year()) == year);
        }
    }

    NAIVE_FORMATS.into_iter().find_map(|format| {
        NaiveDateTime::parse_from_str(&normalized, format)
            .ok()
            .and_then(|naive| from_naive(naive, is_utc))
    })
}

/// Expands numeric zone printed by `date` (`+04` or `-0330`) to the `+hhmm` form.
fn normalize_offset(token: &str) -> Option<String> {
    let digits = token
        .strip_prefix('+')
        .or_else(|| token.strip_prefix('-'))?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match digits.len() {
        2 => Some(format!("{token}00")),
        4 => Some(token.to_string()),
        _ => None,
    }
}

/// Year is always the trailing four digit token of `date` output.
fn date_year(tokens: &[String]) -> Option<i32> {
    tokens
        .last()
        .filter(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
}

fn from_naive(naive: NaiveDateTime, is_utc: bool) -> Option<DateTime<FixedOffset>> {
    if is_utc {
        return Some(Utc.from_utc_datetime(&naive).fixed_offset());
    }

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|timestamp| timestamp.fixed_offset())
}
