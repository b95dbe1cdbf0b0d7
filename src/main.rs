mod export;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calextract_core::config::{ExtractConfig, expand_path};
use calextract_core::date_range::DateRange;
use calextract_core::error::EX_USAGE;
use calextract_core::export::{ExportContext, Format};
use calextract_core::source::{CaldirSource, CalendarFilter};
use calextract_core::CalExtractError;
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::output::Destination;

#[derive(Parser)]
#[command(name = "calextract")]
#[command(about = "Export today's calendar events as plain text, iCalendar or JSON")]
struct Cli {
    /// Path to the output file (defaults to stdout)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Set file type to either 'ics', 'text' or 'json'
    #[arg(short = 't', long = "type")]
    format: Option<String>,

    /// Which calendars to search for events, separate with commas (e.g. Work,Family)
    #[arg(short, long)]
    calendars: Option<String>,

    /// Export this day instead of today (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Calendar directory (defaults to calendar_dir from config)
    #[arg(long)]
    calendar_dir: Option<PathBuf>,

    /// Print verbose messages. Specify multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EX_USAGE),
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Exit status for a failed run. Context added on the way up does not hide
/// the underlying error.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CalExtractError>()
        .map(CalExtractError::exit_code)
        .unwrap_or(1)
}

/// Logs go to stderr; stdout carries the export. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ExtractConfig::load()?;
    let zone = config.zone()?;
    let ctx = ExportContext::new(Utc::now(), zone, config.tzid_label())
        .with_all_day_end(config.all_day_end);

    let format = cli
        .format
        .as_deref()
        .or(config.format.as_deref())
        .map(Format::from_name)
        .unwrap_or_default();

    let filter = match cli.calendars.as_deref() {
        Some(names) => CalendarFilter::parse(names),
        None => CalendarFilter::from_names(config.calendars.clone()),
    };

    let range = match cli.date.as_deref() {
        Some(date) => DateRange::parse_day(date, &zone)?,
        None => DateRange::today(&zone, ctx.now),
    };

    let calendar_dir = cli
        .calendar_dir
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.data_path());

    tracing::debug!(
        calendar_dir = %calendar_dir.display(),
        ?filter,
        tzid = %ctx.tzid,
        "Resolved export settings"
    );

    let source = CaldirSource::new(calendar_dir, zone);
    let destination = Destination::from(cli.file);

    export::run(&source, &range, &filter, format, &ctx, &destination)
        .with_context(|| format!("Failed to export events from {}", source.root().display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "calextract",
            "-f",
            "out.ics",
            "-t",
            "ics",
            "-c",
            "Work,Family",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("out.ics")));
        assert_eq!(cli.format.as_deref(), Some("ics"));
        assert_eq!(cli.calendars.as_deref(), Some("Work,Family"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "calextract",
            "--file",
            "out.json",
            "--type",
            "json",
            "--calendars",
            "Work",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["calextract", "--bogus"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let bad_date = Err::<(), _>(CalExtractError::Argument("bad date".to_string()))
            .context("Failed to export events")
            .unwrap_err();
        assert_eq!(exit_code_for(&bad_date), EX_USAGE);

        let denied = Err::<(), _>(CalExtractError::AccessDenied("no store".to_string()))
            .context("Failed to export events")
            .unwrap_err();
        assert_eq!(exit_code_for(&denied), 1);

        assert_eq!(exit_code_for(&anyhow::anyhow!("unexpected")), 1);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["calextract", "-h"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
