//! `json2ical` CLI — convert a JSON file of calendar events into an `.ics` file.
//!
//! ## Usage
//!
//! ```sh
//! # events.json → output.ics
//! json2ical events.json
//!
//! # Explicit output path
//! json2ical events.json calendar.ics
//!
//! # stdin → stdout
//! cat events.json | json2ical - -
//!
//! # Reject unreadable timestamps instead of writing zero dates
//! json2ical --strict-timestamps events.json
//!
//! # Inspect the normalized events as JSON
//! json2ical --format json events.json -
//! ```
//!
//! Exit code is 0 on success and 1 on any usage, load or write failure.
//! Nothing is written unless the whole input converts.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use json2ical_core::{
    load_file, parse_events, CalendarBuilder, CalendarConfig, CalendarEvent, ClockRandomUid,
    MethodMarker, NormalizeOptions, TimestampPolicy,
};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

/// Output path used when none is given.
const DEFAULT_OUTPUT: &str = "output.ics";

/// Path placeholder for stdin / stdout.
const STDIO: &str = "-";

#[derive(Parser)]
#[command(
    name = "json2ical",
    version,
    about = "Convert JSON calendar events to iCalendar format"
)]
struct Cli {
    /// Input JSON file ("-" reads stdin)
    input: String,

    /// Output file ("-" writes stdout)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Fail on malformed timestamps instead of writing zero dates
    #[arg(long)]
    strict_timestamps: bool,

    /// Omit METHOD:PUBLISH from the calendar header
    #[arg(long)]
    no_method: bool,

    /// Override the PRODID written in the calendar header
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    prodid: Option<String>,

    /// Do not fold lines longer than 75 octets
    #[arg(long)]
    no_fold: bool,

    /// Mark UTC times with a trailing `Z` instead of leaving them floating
    #[arg(long)]
    utc_designator: bool,

    /// What to write: the calendar, or the normalized events as JSON
    #[arg(long, value_enum, default_value_t = OutputFormat::Ics)]
    format: OutputFormat,

    /// Enable debug logging (otherwise RUST_LOG, default warn)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ics,
    Json,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also land here and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `-` output stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let to_stdout = cli.output == STDIO;
    let progress = |msg: String| {
        if !to_stdout {
            println!("{}", msg);
        }
    };

    let options = NormalizeOptions {
        timestamps: if cli.strict_timestamps {
            TimestampPolicy::Strict
        } else {
            TimestampPolicy::Lenient
        },
    };
    let uids = ClockRandomUid::default();

    progress(format!("Loading events from {}...", cli.input));
    let events = load_events(&cli.input, &options, &uids).context("Failed to load JSON input")?;
    debug!(count = events.len(), "loaded events");

    let content = match cli.format {
        OutputFormat::Ics => {
            progress("Converting to iCalendar format...".to_string());
            let config = CalendarConfig {
                product_id: cli
                    .prodid
                    .clone()
                    .unwrap_or_else(|| CalendarConfig::default().product_id),
                method: if cli.no_method {
                    MethodMarker::Absent
                } else {
                    MethodMarker::Present
                },
                fold_lines: !cli.no_fold,
                utc_designator: cli.utc_designator,
            };
            CalendarBuilder::with_config(config)
                .uid_source(uids)
                .render(&events)
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(&events).context("Failed to encode events as JSON")?
        }
    };

    write_output(&cli.output, &content)?;
    progress(format!("Successfully saved to {}", cli.output));
    Ok(())
}

fn load_events(
    input: &str,
    options: &NormalizeOptions,
    uids: &ClockRandomUid,
) -> Result<Vec<CalendarEvent>> {
    if input == STDIO {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(parse_events(&buf, options, uids)?)
    } else {
        Ok(load_file(input, options, uids)?)
    }
}

fn write_output(path: &str, content: &str) -> Result<()> {
    if path == STDIO {
        print!("{}", content);
    } else {
        std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))?;
    }
    Ok(())
}
