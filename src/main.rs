#![deny(warnings)]

mod api;
mod autoupdate;
mod config;
mod error;
mod host;
mod templates;

use crate::{
    api::Api,
    autoupdate::EnableOutcome,
    config::{Config, RawConfig},
    error::{Error as AutoupdateError, ErrorKind},
    host::{Host, JobScheduler, PackageManager},
    templates::create_templates,
};
use anyhow::anyhow;
use chrono::Local;
use clap::{
    crate_authors, crate_description, crate_version, error::ErrorKind as ClapErrorKind, Arg,
    ArgMatches, Command,
};
use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "Examples:
  claude-autoupdate enable              # Enable with default 24h interval
  claude-autoupdate enable --interval 6h
  claude-autoupdate enable -i 12h
  claude-autoupdate status
  claude-autoupdate update

Supported intervals: 1h ~ 7d (hours or days)";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr, stdout is reserved for the command output.
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let mut command = command();
    let matches = match command.try_get_matches_from_mut(env::args_os()) {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if matches.subcommand().is_none() {
        let _ = command.print_help();
        return ExitCode::SUCCESS;
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = AutoupdateError::from(err);
            debug!(kind = ?err.kind(), "Command failed: {err:?}");
            match err.kind() {
                ErrorKind::Unknown => eprintln!("Error: {err:#}"),
                _ => eprintln!("Error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn command() -> Command {
    Command::new("claude-autoupdate")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .after_help(EXAMPLES)
        .arg(
            Arg::new("CONFIG")
                .env("CLAUDE_AUTOUPDATE_CONFIG")
                .short('c')
                .long("config")
                .global(true)
                .default_value("claude-autoupdate.toml")
                .help("Path to the claude-autoupdate configuration file."),
        )
        .subcommand(
            Command::new("enable")
                .about("Enable automatic updates")
                .arg(
                    Arg::new("INTERVAL")
                        .short('i')
                        .long("interval")
                        .help("Update interval, e.g. 6h, 12h, 1d (default: 24h)."),
                ),
        )
        .subcommand(Command::new("disable").about("Disable automatic updates"))
        .subcommand(Command::new("status").about("Show auto-update status"))
        .subcommand(Command::new("update").about("Update claude-code immediately"))
        .subcommand(Command::new("config").about("Show current configuration"))
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!(config = ?raw_config, "claude-autoupdate raw configuration.");

    let config = Config::try_from(raw_config)?;
    let host = Host::from_config(&config);
    let api = Api::new(config, host, create_templates()?);

    execute(&api, matches, &mut io::stdout().lock())
}

/// Runs the subcommand against the specified API, writing the command output to `out`.
fn execute<JS: JobScheduler, PM: PackageManager>(
    api: &Api<JS, PM>,
    matches: &ArgMatches,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let autoupdate = api.autoupdate();
    match matches.subcommand() {
        Some(("enable", matches)) => {
            autoupdate.validate()?;
            let outcome = autoupdate.enable(
                matches.get_one::<String>("INTERVAL").map(String::as_str),
                out,
            )?;
            if let EnableOutcome::Enabled(job_config) = outcome {
                info!(
                    job.label = %api.config.agent.label,
                    job.interval = %job_config.interval,
                    "Auto-updates enabled."
                );
            }
        }
        Some(("disable", _)) => {
            autoupdate.validate()?;
            autoupdate.disable(out)?;
        }
        Some(("status", _)) => {
            autoupdate.status(Local::now().fixed_offset(), out)?;
        }
        Some(("update", _)) => {
            autoupdate.validate()?;
            autoupdate.update(out)?;
        }
        Some(("config", _)) => {
            autoupdate.show_config(out)?;
        }
        Some((name, _)) => return Err(anyhow!("Unknown subcommand '{name}'.")),
        None => {}
    }

    Ok(())
}
