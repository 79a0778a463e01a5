//! YMD Flag demo CLI
//!
//! Shows `YmdFlag` values in use as command-line arguments.

use anyhow::{bail, Context};
use chrono::{NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ymdflag::{Location, YmdFlag};

/// YMD Flag - YYYYMMDD dates that default to today
#[derive(Parser)]
#[command(name = "ymdflag")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Midnight today, local time
    ymdflag show

    # Midnight of a given date in another time zone
    ymdflag show --date 20230704 --tz Antarctica/Syowa

    # A UTC span from start of --start to end of --end
    ymdflag range --start 20230701 --end 20230704

    # Date as a directory path
    ymdflag path --date 20230704 --separator /")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print midnight of a date, in its zone and in UTC
    Show {
        /// YYYYMMDD date; defaults to today
        #[arg(short, long, value_name = "YYYYMMDD", default_value = "", hide_default_value = true)]
        date: YmdFlag,

        /// Time zone name (e.g. "UTC", "Local", "America/New_York")
        #[arg(long)]
        tz: Option<Location>,
    },

    /// Print the UTC span covering a start and end date
    Range {
        /// YYYYMMDD start date; defaults to the end date
        #[arg(short, long, value_name = "YYYYMMDD", default_value = "", hide_default_value = true)]
        start: YmdFlag,

        /// YYYYMMDD end date; defaults to today (local time)
        #[arg(short, long, value_name = "YYYYMMDD", default_value = "", hide_default_value = true)]
        end: YmdFlag,
    },

    /// Print a date as a YYYY/MM/DD directory path
    Path {
        /// YYYYMMDD date; required, a path is never invented
        #[arg(short, long, value_name = "YYYYMMDD", default_value = "", hide_default_value = true)]
        date: YmdFlag,

        /// Path separator; defaults to the host separator
        #[arg(long)]
        separator: Option<char>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Show { date, tz } => cmd_show(date, tz),
        Commands::Range { start, end } => cmd_range(start, end),
        Commands::Path { date, separator } => cmd_path(date, separator),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Initialize tracing from the -v count.
///
/// 0 → warn, 1 → info, 2 → debug, 3+ → trace. `RUST_LOG` wins if set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ymdflag={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print midnight of the date in the requested zone
fn cmd_show(mut date: YmdFlag, tz: Option<Location>) -> anyhow::Result<()> {
    if tz.is_some() {
        date.set_location(tz);
    }
    let location = date.location().copied().unwrap_or_default();

    let time = date.as_datetime();
    info!(yyyymmdd = date.ymd(), %location, "showing date");

    println!(
        "location: {}   date: {}   time: {}   timeUTC: {}",
        location,
        date,
        time,
        time.with_timezone(&Utc)
    );
    Ok(())
}

/// Print the UTC span from the start of `start` to the end of `end`
fn cmd_range(mut start: YmdFlag, mut end: YmdFlag) -> anyhow::Result<()> {
    end.resolve_or_today();
    if start.is_unset() {
        start = end;
    }

    let first = start.try_date()?;
    let last = end.try_date()?;
    if last < first {
        bail!("--start must be before --end");
    }

    let start_time = Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN));
    let end_of_day = last
        .and_hms_opt(23, 59, 59)
        .context("end of day is not representable")?;
    let end_time = Utc.from_utc_datetime(&end_of_day);

    println!("startTime: {}   endTime: {}", start_time, end_time);
    Ok(())
}

/// Print the date as a directory path
fn cmd_path(date: YmdFlag, separator: Option<char>) -> anyhow::Result<()> {
    let separator = separator.unwrap_or(std::path::MAIN_SEPARATOR);
    let path = date.as_dir_path(separator);
    if path.is_empty() {
        bail!("no date given; pass --date YYYYMMDD");
    }

    println!("{}", path);
    Ok(())
}
