//! Report on a staff schedule exported as JSON.
//!
//! Usage: schedule-report --file schedule.json [--policy working_flag_only] [--month 2024-12 [--csv]]
//!   --file PATH    : schedule document (weekly_hours, weekly_off_days, leaves, holidays)
//!   --policy NAME  : conflict rule, respect_off_days (default) or working_flag_only
//!   --month Y-M    : also print the day-by-day status for that month
//!   --csv          : print the month as CSV on stdout instead of a summary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use salonspace_api::{
    models::schedule::{ConflictPolicy, Schedule},
    services::{availability::AvailabilityService, calendar::CalendarService},
};

#[derive(Parser)]
#[command(name = "schedule-report", about = "Check a staff schedule for leave and holiday conflicts")]
struct Args {
    /// Path to the schedule JSON document
    #[arg(long)]
    file: PathBuf,

    /// Conflict rule (respect_off_days | working_flag_only)
    #[arg(long, default_value = "respect_off_days")]
    policy: ConflictPolicy,

    /// Month to lay out, as YYYY-MM
    #[arg(long)]
    month: Option<String>,

    /// Emit the month as CSV
    #[arg(long, requires = "month")]
    csv: bool,
}

fn parse_month(raw: &str) -> anyhow::Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .with_context(|| format!("Expected YYYY-MM, got {raw}"))?;
    Ok((year.parse()?, month.parse()?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Cannot read {}", args.file.display()))?;
    let schedule = Schedule::from_json(&raw)?;

    if let Some(month) = args.month.as_deref() {
        let (year, month) = parse_month(month)?;
        let overview = CalendarService::month_overview(&schedule, year, month)?;

        if args.csv {
            CalendarService::write_csv(&overview, std::io::stdout().lock())?;
            return Ok(());
        }

        tracing::info!(
            "{}-{:02}: {} working day(s)",
            overview.year,
            overview.month,
            overview.working_days
        );
        for day in &overview.days {
            println!("{}  {:<9}  {}", day.date, day.weekday, day.status.as_str());
        }
    }

    for warning in AvailabilityService::hours_warnings(&schedule) {
        tracing::warn!(
            "{}: hours end before they start ({} -> {})",
            warning.day,
            warning.from.format("%H:%M"),
            warning.to.format("%H:%M")
        );
    }

    let conflicts = AvailabilityService::detect_conflicts_with(&schedule, args.policy);
    if conflicts.is_empty() {
        tracing::info!("No conflicts");
    } else {
        tracing::info!("{} conflict(s)", conflicts.len());
        for conflict in conflicts {
            println!("{}  {}", conflict.date, conflict.kind.as_str());
        }
    }

    Ok(())
}
